use std::collections::HashSet;
use tracing::{debug, info};
use crate::error::Result;
use crate::models::{RatingTable, UserRating};
use crate::services::source::FilmSource;

/// Collects every club member's ratings for the films in `slugs`.
///
/// Films nobody logged get no entry. Any member fetch failing aborts the
/// whole aggregation.
pub async fn aggregate_ratings<S>(
    source: &S,
    slugs: &[String],
    club_users: &[String],
) -> Result<RatingTable>
where
    S: FilmSource + ?Sized,
{
    let in_scope: HashSet<&str> = slugs.iter().map(String::as_str).collect();
    let mut table = RatingTable::new();

    info!(users = club_users.len(), "Fetching user ratings");

    for username in club_users {
        debug!(username = %username, "Fetching ratings");
        let ratings = source.user_ratings(username).await?;
        let kept = merge_user_ratings(&mut table, username, ratings, &in_scope, club_users);

        debug!(username = %username, in_list = kept, "Merged ratings");
    }

    Ok(table)
}

/// Folds one member's collection into `table`, ignoring films outside
/// `in_scope`. Returns how many entries were kept.
pub fn merge_user_ratings(
    table: &mut RatingTable,
    username: &str,
    ratings: Vec<UserRating>,
    in_scope: &HashSet<&str>,
    club_users: &[String],
) -> usize {
    let mut kept = 0;
    for UserRating { slug, rating } in ratings {
        if !in_scope.contains(slug.as_str()) {
            continue;
        }
        table.entry(&slug, club_users).set(username, rating);
        kept += 1;
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club() -> Vec<String> {
        vec!["alice".to_string(), "bob".to_string()]
    }

    #[test]
    fn out_of_scope_films_never_enter_the_table() {
        let scope: HashSet<&str> = ["a", "b"].into_iter().collect();
        let mut table = RatingTable::new();

        let kept = merge_user_ratings(
            &mut table,
            "bob",
            vec![UserRating::new("c", Some(3)), UserRating::new("b", None)],
            &scope,
            &club(),
        );

        assert_eq!(kept, 1);
        assert!(table.get("c").is_none());
        assert!(table.get("a").is_none());
        assert_eq!(table.get("b").unwrap().get("bob"), Some(None));
    }

    #[test]
    fn later_members_fill_existing_entries() {
        let scope: HashSet<&str> = ["a"].into_iter().collect();
        let mut table = RatingTable::new();

        merge_user_ratings(&mut table, "alice", vec![UserRating::new("a", Some(5))], &scope, &club());
        merge_user_ratings(&mut table, "bob", vec![UserRating::new("a", Some(7))], &scope, &club());

        let ratings = table.get("a").unwrap();
        assert_eq!(ratings.get("alice"), Some(Some(5)));
        assert_eq!(ratings.get("bob"), Some(Some(7)));
        assert_eq!(ratings.usernames().count(), 2);
    }
}
