use regex::Regex;

use crate::error::Result;
use crate::parser::leading_year;
use crate::types::MediaRecord;

/// Title and optional year recovered by [`FallbackTitleParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleYear {
    pub title: String,
    pub year: Option<u16>,
}

/// Last-resort title/year extractor for irregular release names.
///
/// Looks for a separator (`.`, `|` or space), an optional year written as
/// `YYYY`, `(YYYY)` or `[YYYY]`, and another separator. Everything before
/// the first such spot is the title. Examples it handles:
///
/// - `The Killing of a Sacred Deer.2017.1080p.WEB-DL.H264.AC3-EVO[EtHD]`
/// - `12 Angry Men 1957 1080p BluRay x264 AAC - Ozlem`
/// - `Life.Is.Beautiful.1997.1080p.BluRay.x264.anoXmous`
pub struct FallbackTitleParser {
    re_title_year: Regex,
    re_trailing_tag: Regex,
}

impl FallbackTitleParser {
    /// Compiles the two patterns.
    ///
    /// # Errors
    ///
    /// Returns `CinefileError::Regex` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_title_year: Regex::new(r"(.*?[.| ])(\(\d{4}\)|\d{4}|\[\d{4}\])?([.| ].*)")?,
            re_trailing_tag: Regex::new(r"(.*)(\[.*\])")?,
        })
    }

    /// Extracts a title and, if present, a year.
    ///
    /// Returns `None` when the pattern does not match at all. A match
    /// without a year token yields `year: None`.
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<TitleYear> {
        let caps = self.re_title_year.captures(input)?;

        let year = caps.get(2).and_then(|m| leading_year(m.as_str().trim()));

        let mut title = caps
            .get(1)
            .map_or("", |m| m.as_str())
            .trim()
            .trim_end_matches(['.', '|'])
            .trim_end()
            .to_string();

        // Drop a bracketed annotation (release-group tag) and what follows it.
        if let Some(tag) = self.re_trailing_tag.captures(&title) {
            title = tag[1].trim_end().to_string();
        }

        Some(TitleYear { title, year })
    }

    /// Runs [`parse`](Self::parse) on the record's current title and writes
    /// the result back. Leaves the record untouched and returns `false` when
    /// nothing matched.
    pub fn apply(&self, record: &mut MediaRecord) -> bool {
        match self.parse(&record.title) {
            Some(TitleYear { title, year }) => {
                record.title = title;
                record.year = year;
                true
            }
            None => false,
        }
    }
}
