use async_trait::async_trait;
use crate::error::Result;
use crate::models::{FilmDetails, UserRating};

/// Where lists, film pages and member collections come from.
#[async_trait]
pub trait FilmSource: Send + Sync {
    /// Film slugs of `owner`'s list, in list order and without duplicates.
    async fn list_slugs(&self, owner: &str, list_slug: &str) -> Result<Vec<String>>;

    /// Static metadata of one film, with every director and the full cast.
    async fn film_details(&self, slug: &str) -> Result<FilmDetails>;

    /// Every film in `username`'s collection, rated or not, in no particular order.
    async fn user_ratings(&self, username: &str) -> Result<Vec<UserRating>>;
}
