use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use crate::clients::ClientPool;
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::extractors::{parse_film_page, parse_list_page, parse_user_films_page};
use crate::models::{FilmDetails, UserRating};
use crate::services::source::FilmSource;
use crate::utils::retry_with_backoff;
use crate::utils::time::sleep_with_jitter;

const MAX_RETRIES: u32 = 3;
const BASE_DELAY_MS: u64 = 1000;
// Stops a runaway pagination loop if the "next" link never disappears.
const MAX_PAGES: u32 = 1000;

/// Scrapes letterboxd.com (or a mirror at `base_url`).
#[derive(Clone)]
pub struct LetterboxdService {
    client_pool: Arc<ClientPool>,
    config: ScrapeConfig,
}

impl LetterboxdService {
    pub fn new(client_pool: Arc<ClientPool>, config: ScrapeConfig) -> Self {
        Self { client_pool, config }
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let delay = self.config.request_delay_ms;
        sleep_with_jitter(delay, delay / 2).await;

        let client = self.client_pool.next_client();
        retry_with_backoff(MAX_RETRIES, BASE_DELAY_MS, || async {
            debug!(url = url, "Fetching page");
            client.get_html(url).await
        })
        .await
        .map_err(|e| {
            error!(error = %e, url = url, "Failed to fetch page");
            e
        })
    }

    fn list_page_url(&self, owner: &str, list_slug: &str, page: u32) -> String {
        format!("{}/{}/list/{}/page/{}/", self.config.base_url, owner, list_slug, page)
    }

    fn film_url(&self, slug: &str) -> String {
        format!("{}/film/{}/", self.config.base_url, slug)
    }

    fn user_films_url(&self, username: &str, page: u32) -> String {
        format!("{}/{}/films/page/{}/", self.config.base_url, username, page)
    }
}

/// Fetches pages 1, 2, ... until one comes back empty, one has no "next"
/// link, or `max_pages` have been read. `fetch_page` returns a page's items
/// and whether another page follows.
pub(crate) async fn collect_pages<T, F, Fut>(max_pages: u32, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, bool)>>,
{
    let mut items = Vec::new();

    for page in 1..=max_pages {
        let (page_items, has_next) = fetch_page(page).await?;
        let empty = page_items.is_empty();
        items.extend(page_items);

        if empty || !has_next {
            return Ok(items);
        }
    }

    warn!(max_pages = max_pages, items = items.len(), "Page limit reached, results truncated");
    Ok(items)
}

/// Keeps the first occurrence of each slug, in order.
pub(crate) fn first_occurrences(slugs: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    slugs
        .into_iter()
        .filter(|slug| seen.insert(slug.clone()))
        .collect()
}

#[async_trait]
impl FilmSource for LetterboxdService {
    async fn list_slugs(&self, owner: &str, list_slug: &str) -> Result<Vec<String>> {
        let slugs = collect_pages(MAX_PAGES, |page| {
            let url = self.list_page_url(owner, list_slug, page);
            async move {
                let parsed = parse_list_page(&self.fetch_html(&url).await?);
                debug!(
                    owner = owner,
                    list_slug = list_slug,
                    page = page,
                    films = parsed.slugs.len(),
                    "Parsed list page"
                );
                Ok((parsed.slugs, parsed.has_next))
            }
        })
        .await?;
        let slugs = first_occurrences(slugs);

        info!(owner = owner, list_slug = list_slug, films = slugs.len(), "Resolved list");
        Ok(slugs)
    }

    async fn film_details(&self, slug: &str) -> Result<FilmDetails> {
        let url = self.film_url(slug);
        let html = self.fetch_html(&url).await?;
        parse_film_page(slug, &url, &html)
    }

    async fn user_ratings(&self, username: &str) -> Result<Vec<UserRating>> {
        collect_pages(MAX_PAGES, |page| {
            let url = self.user_films_url(username, page);
            async move {
                let parsed = parse_user_films_page(&self.fetch_html(&url).await?);
                debug!(
                    username = username,
                    page = page,
                    films = parsed.ratings.len(),
                    "Parsed member films page"
                );
                Ok((parsed.ratings, parsed.has_next))
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> LetterboxdService {
        let config = ScrapeConfig {
            base_url: "https://letterboxd.com".to_string(),
            request_delay_ms: 0,
        };
        LetterboxdService::new(Arc::new(ClientPool::new().unwrap()), config)
    }

    #[test]
    fn builds_page_urls() {
        let service = service();
        assert_eq!(
            service.list_page_url("owner", "club-picks", 2),
            "https://letterboxd.com/owner/list/club-picks/page/2/"
        );
        assert_eq!(service.film_url("alien"), "https://letterboxd.com/film/alien/");
        assert_eq!(
            service.user_films_url("alice", 1),
            "https://letterboxd.com/alice/films/page/1/"
        );
    }

    fn list_html(slugs: &[&str], has_next: bool) -> String {
        let items: String = slugs
            .iter()
            .map(|slug| format!(r#"<li class="poster-container"><div data-film-slug="{}"></div></li>"#, slug))
            .collect();
        let next = if has_next { r#"<a class="next" href="/page/next/">Older</a>"# } else { "" };
        format!("<ul>{}</ul><div class=\"paginate-nextprev\">{}</div>", items, next)
    }

    async fn read_list(pages: &[String], max_pages: u32) -> (Vec<String>, Vec<u32>) {
        let mut requested = Vec::new();
        let slugs = collect_pages(max_pages, |page| {
            requested.push(page);
            let html = pages.get(page as usize - 1).cloned().unwrap_or_default();
            async move {
                let parsed = parse_list_page(&html);
                Ok((parsed.slugs, parsed.has_next))
            }
        })
        .await
        .unwrap();
        (first_occurrences(slugs), requested)
    }

    #[tokio::test]
    async fn duplicate_across_pages_keeps_first_position() {
        let pages = vec![
            list_html(&["alien", "heat"], true),
            list_html(&["ran", "alien"], false),
        ];

        let (slugs, requested) = read_list(&pages, MAX_PAGES).await;

        assert_eq!(slugs, vec!["alien", "heat", "ran"]);
        assert_eq!(requested, vec![1, 2]);
    }

    #[tokio::test]
    async fn stops_at_page_without_next_link() {
        let pages = vec![
            list_html(&["alien"], false),
            list_html(&["never-read"], false),
        ];

        let (slugs, requested) = read_list(&pages, MAX_PAGES).await;

        assert_eq!(slugs, vec!["alien"]);
        assert_eq!(requested, vec![1]);
    }

    #[tokio::test]
    async fn stops_at_empty_page_even_with_next_link() {
        let pages = vec![
            list_html(&["alien"], true),
            list_html(&[], true),
            list_html(&["never-read"], false),
        ];

        let (slugs, requested) = read_list(&pages, MAX_PAGES).await;

        assert_eq!(slugs, vec!["alien"]);
        assert_eq!(requested, vec![1, 2]);
    }

    #[tokio::test]
    async fn stops_at_page_limit() {
        let pages: Vec<String> = (0..5)
            .map(|n| {
                let slug = format!("film-{}", n);
                list_html(&[slug.as_str()], true)
            })
            .collect();

        let (slugs, requested) = read_list(&pages, 3).await;

        assert_eq!(slugs, vec!["film-0", "film-1", "film-2"]);
        assert_eq!(requested, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn page_error_aborts_collection() {
        let result: Result<Vec<String>> = collect_pages(MAX_PAGES, |page| async move {
            if page == 1 {
                Ok((vec!["alien".to_string()], true))
            } else {
                Err(crate::error::Error::RateLimit)
            }
        })
        .await;

        assert!(matches!(result, Err(crate::error::Error::RateLimit)));
    }
}
