use std::fmt;

use serde::{Deserialize, Serialize};

/// Video resolution as advertised in a release name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resolution {
    /// 480p / 480i
    SD480,
    /// 576p (PAL DVD rips)
    SD576,
    /// 720p
    HD720,
    /// 1080p / 1080i
    FHD1080,
    /// 2160p / 4K
    UHD2160,
}

impl Resolution {
    /// Maps the numeric part of a resolution token (`"1080"` from `1080p`).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "480" => Some(Self::SD480),
            "576" => Some(Self::SD576),
            "720" => Some(Self::HD720),
            "1080" => Some(Self::FHD1080),
            "2160" | "4k" | "4K" => Some(Self::UHD2160),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SD480 => write!(f, "480p"),
            Self::SD576 => write!(f, "576p"),
            Self::HD720 => write!(f, "720p"),
            Self::FHD1080 => write!(f, "1080p"),
            Self::UHD2160 => write!(f, "2160p"),
        }
    }
}

/// Video codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoCodec {
    H264,
    HEVC,
    AV1,
    XviD,
    DivX,
}

impl VideoCodec {
    /// Classifies a codec token, case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "x264" | "x.264" | "h264" | "h.264" | "avc" => Some(Self::H264),
            "x265" | "x.265" | "h265" | "h.265" | "hevc" => Some(Self::HEVC),
            "av1" => Some(Self::AV1),
            "xvid" => Some(Self::XviD),
            "divx" => Some(Self::DivX),
            _ => None,
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H264 => write!(f, "H.264"),
            Self::HEVC => write!(f, "HEVC"),
            Self::AV1 => write!(f, "AV1"),
            Self::XviD => write!(f, "XviD"),
            Self::DivX => write!(f, "DivX"),
        }
    }
}

/// Audio codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCodec {
    AAC,
    AC3,
    EAC3,
    DTS,
    TrueHD,
    FLAC,
    MP3,
}

impl AudioCodec {
    /// Classifies an audio codec token, case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        match token.as_str() {
            "aac" => Some(Self::AAC),
            "ac3" | "dd5.1" | "dd" => Some(Self::AC3),
            "eac3" | "e-ac3" | "ddp" | "ddp5.1" => Some(Self::EAC3),
            "flac" => Some(Self::FLAC),
            "mp3" => Some(Self::MP3),
            s if s.starts_with("dts") => Some(Self::DTS),
            s if s.contains("truehd") => Some(Self::TrueHD),
            _ => None,
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AAC => write!(f, "AAC"),
            Self::AC3 => write!(f, "AC3"),
            Self::EAC3 => write!(f, "E-AC3"),
            Self::DTS => write!(f, "DTS"),
            Self::TrueHD => write!(f, "TrueHD"),
            Self::FLAC => write!(f, "FLAC"),
            Self::MP3 => write!(f, "MP3"),
        }
    }
}

/// Where the release was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    BluRayRemux,
    BluRay,
    WebDL,
    WebRip,
    HDTV,
    DVD,
    Cam,
}

impl MediaSource {
    /// Classifies a source token. Separators (`-`, ` `) are ignored.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let source = token.to_lowercase().replace([' ', '-'], "");
        match source.as_str() {
            s if s.contains("remux") => Some(Self::BluRayRemux),
            s if s.starts_with("blu") || s == "bdrip" || s == "brrip" => Some(Self::BluRay),
            "webdl" | "web" => Some(Self::WebDL),
            "webrip" => Some(Self::WebRip),
            "hdtv" => Some(Self::HDTV),
            s if s.starts_with("dvd") => Some(Self::DVD),
            "cam" | "hdcam" | "ts" | "telesync" => Some(Self::Cam),
            _ => None,
        }
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BluRayRemux => write!(f, "Blu-ray Remux"),
            Self::BluRay => write!(f, "Blu-ray"),
            Self::WebDL => write!(f, "WEB-DL"),
            Self::WebRip => write!(f, "WEBRip"),
            Self::HDTV => write!(f, "HDTV"),
            Self::DVD => write!(f, "DVD"),
            Self::Cam => write!(f, "CAM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_tokens() {
        assert_eq!(Resolution::from_token("1080"), Some(Resolution::FHD1080));
        assert_eq!(Resolution::from_token("4K"), Some(Resolution::UHD2160));
        assert_eq!(Resolution::from_token("1081"), None);
        assert!(Resolution::UHD2160 > Resolution::HD720);
    }

    #[test]
    fn resolution_display() {
        assert_eq!(Resolution::FHD1080.to_string(), "1080p");
        assert_eq!(Resolution::SD576.to_string(), "576p");
    }

    #[test]
    fn video_codec_tokens() {
        for (token, expected) in [
            ("x264", VideoCodec::H264),
            ("H.264", VideoCodec::H264),
            ("x265", VideoCodec::HEVC),
            ("HEVC", VideoCodec::HEVC),
            ("XviD", VideoCodec::XviD),
        ] {
            assert_eq!(VideoCodec::from_token(token), Some(expected), "token: {token}");
        }
        assert_eq!(VideoCodec::from_token("mkv"), None);
    }

    #[test]
    fn audio_codec_tokens() {
        assert_eq!(AudioCodec::from_token("AC3"), Some(AudioCodec::AC3));
        assert_eq!(AudioCodec::from_token("DTS-HD"), Some(AudioCodec::DTS));
        assert_eq!(AudioCodec::from_token("TrueHD"), Some(AudioCodec::TrueHD));
        assert_eq!(AudioCodec::from_token("DDP5.1"), Some(AudioCodec::EAC3));
    }

    #[test]
    fn media_source_tokens() {
        assert_eq!(MediaSource::from_token("WEB-DL"), Some(MediaSource::WebDL));
        assert_eq!(MediaSource::from_token("BluRay"), Some(MediaSource::BluRay));
        assert_eq!(MediaSource::from_token("Blu-ray Remux"), Some(MediaSource::BluRayRemux));
        assert_eq!(MediaSource::from_token("DVDRip"), Some(MediaSource::DVD));
        assert_eq!(MediaSource::from_token("anoXmous"), None);
    }

    #[test]
    fn quality_enum_serialization() {
        let json = serde_json::to_string(&VideoCodec::HEVC).unwrap();
        assert_eq!(json, "\"HEVC\"");
        let back: MediaSource = serde_json::from_str("\"WebDL\"").unwrap();
        assert_eq!(back, MediaSource::WebDL);
    }
}
