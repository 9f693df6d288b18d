pub mod clients;
pub mod config;
pub mod error;
pub mod extractors;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use clients::{ClientPool, HttpClient};
pub use error::{Error, Result};
pub use models::{ActorInfo, ClubRatings, FilmDetails, MovieRecord, RatingTable, UserRating};
pub use services::{build_report, run, FilmSource, LetterboxdService, ReportSummary};
pub use storage::JsonWriter;
