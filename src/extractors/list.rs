use select::document::Document;
use super::{has_next_page, poster_items, poster_slug};

/// One page of a Letterboxd list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    /// Film slugs in list order.
    pub slugs: Vec<String>,
    pub has_next: bool,
}

pub fn parse_list_page(html: &str) -> ListPage {
    let document = Document::from(html);

    let slugs = poster_items(&document)
        .filter_map(|item| poster_slug(&item))
        .collect();

    ListPage {
        slugs,
        has_next: has_next_page(&document),
    }
}
