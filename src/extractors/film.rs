use serde::Deserialize;
use select::document::Document;
use select::node::Node;
use select::predicate::{Attr, Class, Name, Predicate};
use crate::error::{Error, Result};
use crate::models::{ActorInfo, FilmDetails};

#[derive(Debug, Deserialize)]
struct FilmJsonLd {
    name: Option<String>,
    image: Option<String>,
    #[serde(rename = "aggregateRating")]
    aggregate_rating: Option<AggregateRating>,
    #[serde(default)]
    director: OneOrMany<Person>,
    #[serde(rename = "releasedEvent", default)]
    released_event: OneOrMany<ReleasedEvent>,
}

#[derive(Debug, Deserialize)]
struct AggregateRating {
    #[serde(rename = "ratingValue")]
    rating_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Person {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleasedEvent {
    #[serde(rename = "startDate")]
    start_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Parses a film page. `url` is only used in error messages.
pub fn parse_film_page(slug: &str, url: &str, html: &str) -> Result<FilmDetails> {
    let document = Document::from(html);
    let json_ld = film_json_ld(&document, url)?;

    let title = json_ld
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| Error::parse(url, "film metadata has no title"))?;

    let year = json_ld
        .released_event
        .into_vec()
        .into_iter()
        .filter_map(|event| event.start_date)
        .find_map(|date| date.get(..4).and_then(|y| y.parse::<i32>().ok()))
        .unwrap_or(0);

    Ok(FilmDetails {
        slug: slug.to_string(),
        poster_url: json_ld.image.unwrap_or_default(),
        title,
        year,
        runtime: runtime_minutes(&document).unwrap_or(0),
        avg_rating: json_ld
            .aggregate_rating
            .and_then(|r| r.rating_value)
            .unwrap_or(0.0),
        directors: json_ld
            .director
            .into_vec()
            .into_iter()
            .filter_map(|person| person.name)
            .filter(|name| !name.trim().is_empty())
            .collect(),
        cast: cast(&document),
    })
}

fn film_json_ld(document: &Document, url: &str) -> Result<FilmJsonLd> {
    let script = document
        .find(Name("script").and(Attr("type", "application/ld+json")))
        .next()
        .ok_or_else(|| Error::parse(url, "no JSON-LD block"))?
        .text();

    // The block is wrapped in `/* <![CDATA[ */ ... /* ]]> */`.
    let start = script.find('{');
    let end = script.rfind('}');
    let body = match (start, end) {
        (Some(start), Some(end)) if start < end => &script[start..=end],
        _ => return Err(Error::parse(url, "JSON-LD block holds no object")),
    };

    serde_json::from_str(body).map_err(|e| Error::parse(url, format!("film metadata: {}", e)))
}

/// Reads `132 mins` out of the page footer.
fn runtime_minutes(document: &Document) -> Option<u32> {
    let footer = document
        .find(Name("p").and(Class("text-footer")))
        .next()?
        .text();

    let tokens: Vec<&str> = footer.split_whitespace().collect();
    tokens
        .windows(2)
        .find(|pair| pair[1].starts_with("min"))
        .and_then(|pair| pair[0].replace(',', "").parse().ok())
}

fn cast(document: &Document) -> Vec<ActorInfo> {
    document
        .find(Class("cast-list").descendant(Name("a")))
        .filter_map(|link| actor(&link))
        .collect()
}

fn actor(link: &Node) -> Option<ActorInfo> {
    let slug = link
        .attr("href")?
        .trim_matches('/')
        .strip_prefix("actor/")?
        .split('/')
        .next()
        .filter(|s| !s.is_empty())?
        .to_string();

    Some(ActorInfo {
        slug,
        name: link.text().trim().to_string(),
        role_name: link.attr("title").unwrap_or_default().trim().to_string(),
    })
}
