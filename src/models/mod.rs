mod movie;
mod ratings;

pub use movie::{ActorInfo, FilmDetails, MovieRecord, NO_DIRECTOR};
pub use ratings::{ClubRatings, Rating, RatingTable, UserRating};
