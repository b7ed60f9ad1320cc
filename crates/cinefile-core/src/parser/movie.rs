//! # Movie Parsing Pipeline
//!
//! Chains the release parser and the fallback pattern to turn a movie
//! file name into a clean title and year.

use tracing::debug;

use crate::error::Result;
use crate::parser::fallback::FallbackTitleParser;
use crate::parser::release::ReleaseParser;
use crate::types::{MediaRecord, ParseSource};

/// Configuration for the movie parser.
#[derive(Debug, Clone)]
pub struct MovieParserConfig {
    /// Whether to try the release parser before the fallback pattern
    pub use_release_parser: bool,
}

impl Default for MovieParserConfig {
    fn default() -> Self {
        Self {
            use_release_parser: true,
        }
    }
}

impl MovieParserConfig {
    /// Create a new parser configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the release parser.
    pub fn with_release_parser(mut self, enabled: bool) -> Self {
        self.use_release_parser = enabled;
        self
    }
}

/// Extracts title and year for movie records.
pub struct MovieParser {
    config: MovieParserConfig,
    release: ReleaseParser,
    fallback: FallbackTitleParser,
}

impl MovieParser {
    /// Create a new parser with the given configuration.
    pub fn new(config: MovieParserConfig) -> Result<Self> {
        Ok(Self {
            config,
            release: ReleaseParser::new()?,
            fallback: FallbackTitleParser::new()?,
        })
    }

    /// Create a new parser with default configuration.
    pub fn default() -> Result<Self> {
        Self::new(MovieParserConfig::default())
    }

    /// Rewrites the record's title and year from its current title.
    ///
    /// Strategy:
    /// 1. Run the release parser. A title it finds replaces the record's
    ///    title; if it also finds a year the result is final.
    /// 2. Otherwise run the fallback pattern on the (possibly replaced) title.
    ///
    /// Returns which parser produced the final title, or `None` when neither
    /// changed anything.
    ///
    /// # Examples
    /// ```
    /// use cinefile_core::parser::MovieParser;
    /// use cinefile_core::types::{MediaRecord, ParseSource};
    ///
    /// let parser = MovieParser::default().unwrap();
    /// let mut record = MediaRecord::movie("/films/12 Angry Men 1957 1080p BluRay x264 AAC - Ozlem.mkv");
    ///
    /// assert_eq!(parser.extract(&mut record), Some(ParseSource::Release));
    /// assert_eq!(record.title, "12 Angry Men");
    /// assert_eq!(record.year, Some(1957));
    /// ```
    pub fn extract(&self, record: &mut MediaRecord) -> Option<ParseSource> {
        let mut release_title = false;

        if self.config.use_release_parser {
            match self.release.parse(&record.title) {
                Ok(info) => {
                    if let Some(title) = info.title {
                        record.title = title;
                        release_title = true;
                        if let Some(year) = info.year {
                            record.year = Some(year);
                            debug!(title = %record.title, year, "release parser matched");
                            record.parse_source = Some(ParseSource::Release);
                            return record.parse_source;
                        }
                    }
                }
                Err(e) => {
                    debug!(path = %record.path.display(), error = %e, "release parser failed");
                }
            }
        }

        if self.fallback.apply(record) {
            debug!(title = %record.title, year = ?record.year, "fallback pattern matched");
            record.parse_source = Some(ParseSource::Fallback);
        } else if release_title {
            record.parse_source = Some(ParseSource::Release);
        }

        record.parse_source
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &MovieParserConfig {
        &self.config
    }
}

/// Convenience function to extract title and year with default settings.
pub fn extract_movie_info(record: &mut MediaRecord) -> Result<Option<ParseSource>> {
    let parser = MovieParser::default()?;
    Ok(parser.extract(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_creation() {
        assert!(MovieParser::default().is_ok());
    }

    #[test]
    fn test_parser_config() {
        let config = MovieParserConfig::new().with_release_parser(false);
        assert!(!config.use_release_parser);
        assert!(MovieParserConfig::default().use_release_parser);
    }

    #[test]
    fn release_parser_is_authoritative() {
        let parser = MovieParser::default().unwrap();
        let mut record =
            MediaRecord::movie("/films/Life.Is.Beautiful.1997.1080p.BluRay.x264.anoXmous.mkv");

        assert_eq!(parser.extract(&mut record), Some(ParseSource::Release));
        assert_eq!(record.title, "Life Is Beautiful");
        assert_eq!(record.year, Some(1997));
    }

    #[test]
    fn fallback_only_mode() {
        let config = MovieParserConfig::new().with_release_parser(false);
        let parser = MovieParser::new(config).unwrap();
        let mut record =
            MediaRecord::movie("/films/Life.Is.Beautiful.1997.1080p.BluRay.x264.anoXmous.mkv");

        assert_eq!(parser.extract(&mut record), Some(ParseSource::Fallback));
        assert_eq!(record.title, "Life.Is.Beautiful");
        assert_eq!(record.year, Some(1997));
        assert_eq!(record.parse_source, Some(ParseSource::Fallback));
    }

    #[test]
    fn yearless_release_keeps_release_title() {
        let parser = MovieParser::default().unwrap();
        let mut record = MediaRecord::movie("/films/Some.Movie.1080p.x264.mkv");

        assert_eq!(parser.extract(&mut record), Some(ParseSource::Release));
        assert_eq!(record.title, "Some Movie");
        assert_eq!(record.year, None);
        assert_eq!(record.parse_source, Some(ParseSource::Release));
    }

    #[test]
    fn fallback_runs_on_release_title() {
        let parser = MovieParser::default().unwrap();
        let mut record = MediaRecord::movie("/films/Heat. Directors Cut.mkv");

        // The release parser turns the dot into a space, so the fallback
        // pattern no longer sees a double separator.
        assert_eq!(parser.extract(&mut record), Some(ParseSource::Release));
        assert_eq!(record.title, "Heat Directors Cut");
        assert_eq!(record.year, None);
    }

    #[test]
    fn nothing_to_extract() {
        let parser = MovieParser::new(MovieParserConfig::new().with_release_parser(false)).unwrap();
        let mut record = MediaRecord::movie("/films/Heat.mkv");
        assert_eq!(parser.extract(&mut record), None);
        assert_eq!(record.title, "Heat");
        assert_eq!(record.parse_source, None);
    }

    #[test]
    fn empty_title_falls_through() {
        let parser = MovieParser::default().unwrap();
        let mut record = MediaRecord::movie("/films/ ");
        record.title = String::new();
        assert_eq!(parser.extract(&mut record), None);
        assert_eq!(record.title, "");
    }

    #[test]
    fn test_convenience_function() {
        let mut record = MediaRecord::movie("/films/The_Matrix_1999_720p_x264.mkv");
        let source = extract_movie_info(&mut record).unwrap();
        assert_eq!(source, Some(ParseSource::Release));
        assert_eq!(record.title, "The Matrix");
        assert_eq!(record.year, Some(1999));
    }
}
