use std::collections::HashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Letterboxd rating in half stars, 0..=10.
pub type Rating = u8;

/// A film from a user's collection. `rating` is `None` when the user logged
/// the film without rating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRating {
    pub slug: String,
    pub rating: Option<Rating>,
}

impl UserRating {
    pub fn new(slug: impl Into<String>, rating: Option<Rating>) -> Self {
        Self {
            slug: slug.into(),
            rating,
        }
    }
}

/// Per-film ratings keyed by club member, in configured member order.
///
/// The key set is fixed at construction: every club member is present,
/// nobody else can be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubRatings {
    entries: Vec<(String, Option<Rating>)>,
}

impl ClubRatings {
    pub fn unrated(club_users: &[String]) -> Self {
        Self {
            entries: club_users.iter().map(|u| (u.clone(), None)).collect(),
        }
    }

    /// Records `username`'s rating. Returns false if the user is not a club member.
    pub fn set(&mut self, username: &str, rating: Option<Rating>) -> bool {
        match self.entries.iter_mut().find(|(u, _)| u == username) {
            Some(entry) => {
                entry.1 = rating;
                true
            }
            None => false,
        }
    }

    /// `None` if the user is not a club member, `Some(None)` if unrated.
    pub fn get(&self, username: &str) -> Option<Option<Rating>> {
        self.entries
            .iter()
            .find(|(u, _)| u == username)
            .map(|(_, r)| *r)
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(u, _)| u.as_str())
    }

    pub fn rated(&self) -> impl Iterator<Item = Rating> + '_ {
        self.entries.iter().filter_map(|(_, r)| *r)
    }
}

impl Serialize for ClubRatings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (username, rating) in &self.entries {
            map.serialize_entry(username, rating)?;
        }
        map.end()
    }
}

/// Club ratings for in-scope films that at least one member has logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingTable {
    by_slug: HashMap<String, ClubRatings>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the film's ratings, inserting a fresh all-unrated entry first if needed.
    pub fn entry(&mut self, slug: &str, club_users: &[String]) -> &mut ClubRatings {
        self.by_slug
            .entry(slug.to_string())
            .or_insert_with(|| ClubRatings::unrated(club_users))
    }

    pub fn get(&self, slug: &str) -> Option<&ClubRatings> {
        self.by_slug.get(slug)
    }

    /// The film's ratings, or an all-unrated set when nobody logged it.
    pub fn get_or_unrated(&self, slug: &str, club_users: &[String]) -> ClubRatings {
        self.by_slug
            .get(slug)
            .cloned()
            .unwrap_or_else(|| ClubRatings::unrated(club_users))
    }
}
