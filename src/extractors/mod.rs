//! HTML page parsers. Each takes a page body and returns typed values; none
//! of them touch the network.

pub mod film;
pub mod list;
pub mod user_films;

pub use film::parse_film_page;
pub use list::{parse_list_page, ListPage};
pub use user_films::{parse_user_films_page, UserFilmsPage};

use select::document::Document;
use select::node::Node;
use select::predicate::{Class, Name, Predicate};

/// Poster grid entries on list and collection pages.
pub(crate) fn poster_items(document: &Document) -> impl Iterator<Item = Node<'_>> {
    document.find(
        Name("li").and(
            Class("poster-container")
                .or(Class("posteritem"))
                .or(Class("griditem")),
        ),
    )
}

/// The film slug carried by a poster entry, whichever markup generation it uses.
pub(crate) fn poster_slug(item: &Node) -> Option<String> {
    for node in item.descendants() {
        for attr in ["data-film-slug", "data-item-slug"] {
            if let Some(slug) = node.attr(attr).map(str::trim).filter(|s| !s.is_empty()) {
                return Some(slug.to_string());
            }
        }
        for attr in ["data-target-link", "data-item-link"] {
            if let Some(slug) = node.attr(attr).and_then(film_slug_from_link) {
                return Some(slug);
            }
        }
    }
    None
}

/// `/film/parasite-2019/` -> `parasite-2019`
pub(crate) fn film_slug_from_link(link: &str) -> Option<String> {
    link.trim_matches('/')
        .strip_prefix("film/")
        .and_then(|rest| rest.split('/').next())
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
}

pub(crate) fn has_next_page(document: &Document) -> bool {
    document.find(Name("a").and(Class("next"))).next().is_some()
}
