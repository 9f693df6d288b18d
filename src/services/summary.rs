use tracing::info;
use crate::models::MovieRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub movie_count: usize,
    /// Movies with at least one club rating.
    pub rated_movie_count: usize,
    /// Sum of runtimes in minutes.
    pub total_runtime: u64,
    /// Rated movie count per member, in club order.
    pub ratings_per_user: Vec<(String, usize)>,
    /// Mean of all club ratings in stars (0-5), `None` if nobody rated anything.
    pub club_average: Option<f64>,
}

impl ReportSummary {
    pub fn from_records(records: &[MovieRecord], club_users: &[String]) -> Self {
        let ratings_per_user = club_users
            .iter()
            .map(|user| {
                let rated = records
                    .iter()
                    .filter(|r| matches!(r.club_ratings.get(user), Some(Some(_))))
                    .count();
                (user.clone(), rated)
            })
            .collect();

        let all: Vec<u8> = records.iter().flat_map(|r| r.club_ratings.rated()).collect();
        let club_average = if all.is_empty() {
            None
        } else {
            let sum: u32 = all.iter().map(|r| *r as u32).sum();
            // Ratings are stored in half stars.
            Some(sum as f64 / (2.0 * all.len() as f64))
        };

        Self {
            movie_count: records.len(),
            rated_movie_count: records
                .iter()
                .filter(|r| r.club_ratings.rated().next().is_some())
                .count(),
            total_runtime: records.iter().map(|r| r.runtime as u64).sum(),
            ratings_per_user,
            club_average,
        }
    }

    pub fn log(&self) {
        info!(
            movies = self.movie_count,
            rated_movies = self.rated_movie_count,
            total_runtime_minutes = self.total_runtime,
            club_average = ?self.club_average,
            "Report summary"
        );
        for (user, rated) in &self.ratings_per_user {
            info!(username = %user, rated = rated, "Member ratings");
        }
    }
}
