//! # Cinefile Core
//!
//! Movie release-name parsing and metadata enrichment. Provides the release
//! parser, the fallback title/year pattern, the media record model and the
//! lookup boundary used to attach canonical IMDb metadata.
//!
//! ## Quick Start
//!
//! ```rust
//! use cinefile_core::parser::FallbackTitleParser;
//!
//! let parser = FallbackTitleParser::new().unwrap();
//! let found = parser.parse("Life.Is.Beautiful.1997.1080p.BluRay.x264.anoXmous").unwrap();
//!
//! assert_eq!(found.title, "Life.Is.Beautiful");
//! assert_eq!(found.year, Some(1997));
//! ```
pub mod error;
pub mod lookup;
pub mod parser;
pub mod types;

// Re-export primary API
pub use error::{CinefileError, LookupError, Result};
pub use lookup::{LookupQuery, LookupResponse, MetadataLookup, RatingEntry, RATING_SOURCE};
pub use parser::{
    FallbackTitleParser, MovieParser, MovieParserConfig, ReleaseParser, TitleYear,
};
pub use types::{
    AudioCodec, ImdbId, MediaKind, MediaRecord, MediaSource, ParseSource, ReleaseInfo,
    Resolution, VideoCodec,
};
