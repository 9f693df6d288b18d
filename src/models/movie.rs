use serde::{Deserialize, Serialize};
use super::ratings::ClubRatings;

/// Written in place of a director when the film page lists none.
pub const NO_DIRECTOR: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorInfo {
    pub slug: String,
    pub name: String,
    pub role_name: String,
}

/// Static film metadata as reported by the source, before any policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmDetails {
    pub slug: String,
    pub poster_url: String,
    pub title: String,
    pub year: i32,
    pub runtime: u32,
    pub avg_rating: f64,
    /// Directors in the order the source reports them.
    pub directors: Vec<String>,
    /// Full cast in billing order.
    pub cast: Vec<ActorInfo>,
}

/// One element of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub slug: String,
    pub poster_url: String,
    pub title: String,
    pub year: i32,
    pub runtime: u32,
    pub avg_rating: f64,
    pub director: String,
    pub top_actors: Vec<ActorInfo>,
    pub club_ratings: ClubRatings,
}

impl MovieRecord {
    /// Builds the finished record: first reported director (or `N/A`), the
    /// first `top_actor_count` cast members, and the club's ratings.
    pub fn build(details: FilmDetails, top_actor_count: usize, club_ratings: ClubRatings) -> Self {
        let FilmDetails {
            slug,
            poster_url,
            title,
            year,
            runtime,
            avg_rating,
            directors,
            mut cast,
        } = details;

        let director = directors
            .into_iter()
            .next()
            .unwrap_or_else(|| NO_DIRECTOR.to_string());
        cast.truncate(top_actor_count);

        Self {
            slug,
            poster_url,
            title,
            year,
            runtime,
            avg_rating,
            director,
            top_actors: cast,
            club_ratings,
        }
    }
}
