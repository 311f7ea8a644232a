//! Data models for the movie catalog

pub mod lookup;
pub mod movie;

// Re-export commonly used types
pub use lookup::{Genre, Language};
pub use movie::{CreateMovie, Movie, MovieDetails, MoviePatch, NewMovie, UpdateMovie};
