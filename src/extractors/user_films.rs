use select::document::Document;
use select::predicate::{Class, Name, Predicate};
use crate::models::{Rating, UserRating};
use super::{has_next_page, poster_items, poster_slug};

/// One page of a member's film collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilmsPage {
    pub ratings: Vec<UserRating>,
    pub has_next: bool,
}

pub fn parse_user_films_page(html: &str) -> UserFilmsPage {
    let document = Document::from(html);

    let ratings = poster_items(&document)
        .filter_map(|item| {
            let slug = poster_slug(&item)?;
            let rating = item
                .find(Name("span").and(Class("rating")))
                .next()
                .and_then(|span| span.attr("class").and_then(rating_from_class));
            Some(UserRating::new(slug, rating))
        })
        .collect();

    UserFilmsPage {
        ratings,
        has_next: has_next_page(&document),
    }
}

/// `rating -micro rated-7` -> 7
fn rating_from_class(class: &str) -> Option<Rating> {
    class
        .split_whitespace()
        .find_map(|token| token.strip_prefix("rated-"))
        .and_then(|n| n.parse::<Rating>().ok())
        .filter(|n| *n <= 10)
}
