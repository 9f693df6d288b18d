pub mod aggregator;
pub mod letterboxd;
pub mod report;
pub mod source;
pub mod summary;

pub use aggregator::aggregate_ratings;
pub use letterboxd::LetterboxdService;
pub use report::{build_report, run};
pub use source::FilmSource;
pub use summary::ReportSummary;
