use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Container extensions recognized on bare release names.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "webm", "mpg", "mpeg", "ts",
];

/// What kind of media a record describes.
///
/// Only movies get a parsing pipeline; generic media keep their base name
/// as the title and are looked up without a type restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Media,
    Movie,
}

impl MediaKind {
    /// The `type` value the lookup service filters on, if any.
    #[must_use]
    pub fn lookup_type(self) -> Option<&'static str> {
        match self {
            Self::Media => None,
            Self::Movie => Some("movie"),
        }
    }
}

/// Which parser produced a record's title and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseSource {
    /// The scene-rule release parser produced the title (the year may be
    /// missing when the fallback found none either).
    Release,
    /// The separator/year fallback pattern was used.
    Fallback,
}

impl fmt::Display for ParseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => write!(f, "release"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// An IMDb title identifier (`tt0111161`), stored as its numeric part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImdbId(pub u32);

impl ImdbId {
    /// Parses a `tt`-prefixed identifier. Anything else is malformed.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.trim().strip_prefix("tt")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self)
    }
}

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tt{:07}", self.0)
    }
}

/// A media file on disk plus everything learned about it.
///
/// Built once from a path. Parsing rewrites `title`/`year`; a metadata
/// lookup rewrites `title`, `year`, `id` and `rating`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Full path the record was created from.
    pub path: PathBuf,
    /// Directory part of `path` (empty for bare file names).
    pub folder_name: String,
    /// Last component of `path`.
    pub file_name: String,
    /// Working title; starts as the file name without its extension.
    pub title: String,
    /// Extension with its leading dot, or empty.
    pub extension: String,
    pub kind: MediaKind,
    /// Attached subtitle files, in the order they were added.
    pub subtitles: Vec<PathBuf>,
    /// Language tags inferred from subtitle file names.
    pub subtitle_languages: Vec<String>,
    /// IMDb identifier; `None` while unknown.
    pub id: Option<ImdbId>,
    /// Raw rating value from the rating source, e.g. `"8.1/10"`.
    pub rating: Option<String>,
    pub year: Option<u16>,
    pub parse_source: Option<ParseSource>,
}

impl MediaRecord {
    /// Creates a record of the given kind from a file path.
    pub fn new(path: impl Into<PathBuf>, kind: MediaKind) -> Self {
        let path = path.into();
        let folder_name = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (title, extension) = split_extension(&file_name);

        Self {
            path,
            folder_name,
            file_name,
            title,
            extension,
            kind,
            subtitles: Vec::new(),
            subtitle_languages: Vec::new(),
            id: None,
            rating: None,
            year: None,
            parse_source: None,
        }
    }

    /// Shorthand for `MediaRecord::new(path, MediaKind::Movie)`.
    pub fn movie(path: impl Into<PathBuf>) -> Self {
        Self::new(path, MediaKind::Movie)
    }

    /// Builds a movie record from a bare release name. A trailing dotted
    /// segment that is not a known container extension stays in the title
    /// (`Life.Is.Beautiful.1997.1080p.BluRay.x264.anoXmous`).
    pub fn from_release_name(name: &str) -> Self {
        let mut record = Self::movie(name);
        let ext = record.extension.trim_start_matches('.');
        if !VIDEO_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(ext)) {
            record.title = record.file_name.clone();
            record.extension.clear();
        }
        record
    }

    /// Attaches subtitle files and records any language tags their names carry.
    pub fn add_subtitles<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            let path = path.into();
            if let Some(lang) = subtitle_language(&path) {
                if !self.subtitle_languages.contains(&lang) {
                    self.subtitle_languages.push(lang);
                }
            }
            self.subtitles.push(path);
        }
    }

    /// Returns `true` once at least one subtitle file is attached.
    #[must_use]
    pub fn has_subtitles(&self) -> bool {
        !self.subtitles.is_empty()
    }

    /// The year as text, empty when unknown.
    #[must_use]
    pub fn year_text(&self) -> String {
        self.year.map(|y| y.to_string()).unwrap_or_default()
    }

    /// Numeric part of the rating (`8.1` for `"8.1/10"`).
    #[must_use]
    pub fn rating_score(&self) -> Option<f32> {
        let raw = self.rating.as_deref()?;
        raw.split('/').next()?.trim().parse().ok()
    }
}

/// Splits `name` into stem and dotted extension; a leading dot is not an extension.
fn split_extension(name: &str) -> (String, String) {
    match name.rfind('.') {
        Some(pos) if !name[..pos].trim_start_matches('.').is_empty() => {
            (name[..pos].to_string(), name[pos..].to_string())
        }
        _ => (name.to_string(), String::new()),
    }
}

/// `Movie.en.srt` -> `en`, `Movie.por.srt` -> `por`.
fn subtitle_language(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let (_, tag) = stem.rsplit_once('.')?;
    if (2..=3).contains(&tag.len()) && tag.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(tag.to_ascii_lowercase())
    } else {
        None
    }
}

fn or_none<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

fn join_or_none<T: AsRef<str>>(items: impl IntoIterator<Item = T>) -> String {
    let joined = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() { "None".to_string() } else { joined }
}

impl fmt::Display for MediaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let languages = join_or_none(&self.subtitle_languages);
        let locations = join_or_none(
            self.subtitles
                .iter()
                .map(|p| p.to_string_lossy().into_owned()),
        );

        match self.kind {
            MediaKind::Movie => {
                writeln!(f, "Title: {}", self.title)?;
                writeln!(f, "Year: {}", or_none(self.year))?;
                writeln!(f, "Movie IMDb ID: {}", or_none(self.id))?;
                writeln!(f, "File name: {}", self.file_name)?;
            }
            MediaKind::Media => {
                writeln!(f, "ID: {}", or_none(self.id))?;
                writeln!(f, "Name: {}", self.file_name)?;
            }
        }
        writeln!(f, "Path: {}", self.path.display())?;
        if self.kind == MediaKind::Media {
            writeln!(f, "Title: {}", self.title)?;
        }
        writeln!(f, "File type: {}", self.extension)?;
        writeln!(f, "Subtitles: {}", self.has_subtitles())?;
        writeln!(f, "Subtitle language: {languages}")?;
        writeln!(f, "Subtitle location: {locations}")?;
        writeln!(f)
    }
}
