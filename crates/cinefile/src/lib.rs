//! # Cinefile
//!
//! Identifies movie files from their release names and enriches them with
//! canonical metadata from OMDb.
//!
//! ```rust
//! use cinefile::{MediaRecord, MovieParser};
//!
//! let parser = MovieParser::default().unwrap();
//! let mut movie = MediaRecord::movie("/films/The_Matrix_1999_720p_x264.mkv");
//! parser.extract(&mut movie);
//!
//! assert_eq!(movie.title, "The Matrix");
//! assert_eq!(movie.year, Some(1999));
//! ```

pub use cinefile_core::*;
pub use cinefile_omdb::{OmdbClient, OmdbConfig};
