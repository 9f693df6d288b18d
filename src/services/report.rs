use tracing::{debug, info};
use crate::config::Settings;
use crate::error::Result;
use crate::models::{FilmDetails, MovieRecord};
use crate::services::aggregator::aggregate_ratings;
use crate::services::source::FilmSource;
use crate::services::summary::ReportSummary;
use crate::storage::json::JsonWriter;

/// Resolves the list, fetches every film and every member's ratings, and
/// returns the merged records in list order.
pub async fn build_report<S>(source: &S, settings: &Settings) -> Result<Vec<MovieRecord>>
where
    S: FilmSource + ?Sized,
{
    let slugs = source
        .list_slugs(&settings.list_owner, &settings.list_slug)
        .await?;
    info!(films = slugs.len(), "Found movie slugs in list");

    let mut films: Vec<FilmDetails> = Vec::with_capacity(slugs.len());
    for slug in &slugs {
        debug!(slug = %slug, "Fetching movie info");
        films.push(source.film_details(slug).await?);
    }
    info!("Movie information fetched for all movies");

    let table = aggregate_ratings(source, &slugs, &settings.club_users).await?;

    let records = slugs
        .iter()
        .zip(films)
        .map(|(slug, details)| {
            let club_ratings = table.get_or_unrated(slug, &settings.club_users);
            MovieRecord::build(details, settings.top_actor_count, club_ratings)
        })
        .collect();

    Ok(records)
}

/// Builds the report and writes it to `settings.output_path` in one step.
/// Nothing is written if any fetch fails.
pub async fn run<S>(source: &S, settings: &Settings) -> Result<ReportSummary>
where
    S: FilmSource + ?Sized,
{
    let records = build_report(source, settings).await?;

    JsonWriter::new(&settings.output_path).write_report(&records)?;
    info!(
        path = %settings.output_path.display(),
        movies = records.len(),
        "Report written"
    );

    let summary = ReportSummary::from_records(&records, &settings.club_users);
    summary.log();
    Ok(summary)
}
