use serde::{Deserialize, Serialize};

use super::quality::{AudioCodec, MediaSource, Resolution, VideoCodec};

/// Everything the release parser could read out of a scene-style name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Original input string (trimmed).
    pub input: String,

    /// Human-readable title with separators normalized to spaces.
    pub title: Option<String>,

    /// Release year.
    pub year: Option<u16>,

    /// Release group (`[Group]` prefix or `-GROUP` suffix).
    pub group: Option<String>,

    pub resolution: Option<Resolution>,
    pub video_codec: Option<VideoCodec>,
    pub audio_codec: Option<AudioCodec>,
    pub source: Option<MediaSource>,

    /// Container extension (without leading dot), when the input still had one.
    pub extension: Option<String>,
}

impl ReleaseInfo {
    /// Creates an empty `ReleaseInfo` for the given input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            title: None,
            year: None,
            group: None,
            resolution: None,
            video_codec: None,
            audio_codec: None,
            source: None,
            extension: None,
        }
    }

    /// Returns `true` when both title and year were found, which makes the
    /// result authoritative for movie identification.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.year.is_some()
    }

    /// Returns `true` if any quality tag was extracted.
    #[must_use]
    pub fn has_quality(&self) -> bool {
        self.resolution.is_some()
            || self.video_codec.is_some()
            || self.audio_codec.is_some()
            || self.source.is_some()
    }
}

impl std::fmt::Display for ReleaseInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReleaseInfo(")?;
        if let Some(ref title) = self.title {
            write!(f, "title={title:?}")?;
        }
        if let Some(year) = self.year {
            write!(f, ", year={year}")?;
        }
        if let Some(ref res) = self.resolution {
            write!(f, ", res={res}")?;
        }
        if let Some(ref group) = self.group {
            write!(f, ", group={group:?}")?;
        }
        write!(f, ")")
    }
}
