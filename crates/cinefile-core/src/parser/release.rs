use regex::Regex;

use crate::error::{CinefileError, Result};
use crate::types::{AudioCodec, MediaSource, ReleaseInfo, Resolution, VideoCodec};

/// Scene-rule parser for movie release names.
///
/// Reads quality tags, release group and year out of names such as
/// `Heat.1995.1080p.BluRay.x264-GROUP` and takes the title to be the text
/// before the year (or before the first tag when there is no year).
pub struct ReleaseParser {
    re_group_prefix: Regex,
    re_group_suffix: Regex,
    re_extension: Regex,
    re_resolution: Regex,
    re_vcodec: Regex,
    re_acodec: Regex,
    re_source: Regex,
    re_year: Regex,
}

impl ReleaseParser {
    /// Constructs a new `ReleaseParser` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `CinefileError::Regex` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_group_prefix: Regex::new(r"^\[([^\]]+)\]")?,
            re_group_suffix: Regex::new(r"-\s*([A-Za-z0-9]+)(?:\[[^\]]*\])?$")?,
            re_extension: Regex::new(r"\.(mkv|mp4|avi|m4v|mov|wmv|webm|mpe?g|ts)$")?,
            re_resolution: Regex::new(r"(?i)\b(?:(2160|1080|720|576|480)[pi]|(4k))\b")?,
            re_vcodec: Regex::new(r"(?i)\b(x\.?264|x\.?265|h\.?264|h\.?265|hevc|avc|av1|xvid|divx)\b")?,
            re_acodec: Regex::new(
                r"(?i)\b(aac|e-?ac3|ac3|ddp?(?:5\.1)?|dts(?:-?hd)?|truehd|flac|mp3)\b",
            )?,
            re_source: Regex::new(
                r"(?i)\b(blu-?ray[ .]?remux|bdremux|blu-?ray|bdrip|brrip|web-?dl|web-?rip|web|hdtv|dvd(?:rip)?|hdcam|cam|telesync)\b",
            )?,
            re_year: Regex::new(r"\b((?:19|20)\d{2})\b")?,
        })
    }

    /// Parses a release name.
    ///
    /// # Errors
    ///
    /// Returns `CinefileError::EmptyInput` if the input is empty or whitespace-only.
    pub fn parse(&self, input: &str) -> Result<ReleaseInfo> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CinefileError::EmptyInput);
        }

        let mut info = ReleaseInfo::new(trimmed);

        let mut work = trimmed;
        info.extension = self.extract_extension(work);
        if let Some(ref ext) = info.extension {
            work = &work[..work.len() - ext.len() - 1];
        }

        info.group = self.extract_prefix_group(work);
        if info.group.is_some() {
            if let Some(end) = work.find(']') {
                work = &work[end + 1..];
            }
        }

        // `_` counts as a word character for `\b`; a space has the same byte length.
        let work = work.replace('_', " ");

        info.resolution = self.extract_resolution(&work);
        info.video_codec = self.extract_video_codec(&work);
        info.audio_codec = self.extract_audio_codec(&work);
        info.source = self.extract_source(&work);

        let year = self.extract_year(&work);
        info.year = year.map(|(y, _)| y);

        if info.group.is_none() && (info.year.is_some() || info.has_quality()) {
            info.group = self.extract_suffix_group(&work);
        }

        info.title = self.extract_title(&work, year.map(|(_, pos)| pos));

        Ok(info)
    }

    fn extract_extension(&self, input: &str) -> Option<String> {
        self.re_extension.captures(input).map(|c| c[1].to_string())
    }

    fn extract_prefix_group(&self, input: &str) -> Option<String> {
        self.re_group_prefix
            .captures(input)
            .map(|c| c[1].trim().to_string())
            .filter(|g| !g.is_empty())
    }

    fn extract_suffix_group(&self, input: &str) -> Option<String> {
        self.re_group_suffix
            .captures(input)
            .map(|c| c[1].to_string())
    }

    fn extract_resolution(&self, input: &str) -> Option<Resolution> {
        self.re_resolution.captures(input).and_then(|c| {
            c.get(1)
                .or_else(|| c.get(2))
                .and_then(|m| Resolution::from_token(m.as_str()))
        })
    }

    fn extract_video_codec(&self, input: &str) -> Option<VideoCodec> {
        self.re_vcodec
            .captures(input)
            .and_then(|c| VideoCodec::from_token(&c[1]))
    }

    fn extract_audio_codec(&self, input: &str) -> Option<AudioCodec> {
        self.re_acodec
            .captures(input)
            .and_then(|c| AudioCodec::from_token(&c[1]))
    }

    fn extract_source(&self, input: &str) -> Option<MediaSource> {
        self.re_source
            .captures(input)
            .and_then(|c| MediaSource::from_token(&c[1]))
    }

    /// Picks the last year-like token that has title text before it, so
    /// numeric titles (`2001.A.Space.Odyssey.1968`, `1917.2019`) keep their number.
    fn extract_year(&self, input: &str) -> Option<(u16, usize)> {
        self.re_year
            .captures_iter(input)
            .filter_map(|c| c.get(1))
            .filter(|m| input[..m.start()].chars().any(char::is_alphanumeric))
            .last()
            .and_then(|m| m.as_str().parse::<u16>().ok().map(|y| (y, m.start())))
    }

    /// Byte offset of the first quality tag or bracketed annotation that
    /// follows some title text.
    fn first_tag_position(&self, input: &str) -> Option<usize> {
        let tags = [
            &self.re_resolution,
            &self.re_vcodec,
            &self.re_acodec,
            &self.re_source,
        ]
        .into_iter()
        .filter_map(|re| re.find(input).map(|m| m.start()));

        let bracket = input
            .char_indices()
            .find(|&(i, c)| (c == '[' || c == '(') && input[..i].chars().any(char::is_alphanumeric))
            .map(|(i, _)| i);

        tags.chain(bracket).min()
    }

    fn extract_title(&self, input: &str, year_pos: Option<usize>) -> Option<String> {
        let cut = match year_pos {
            Some(pos) => pos,
            None => self.first_tag_position(input).unwrap_or(input.len()),
        };

        let cleaned = input[..cut]
            .replace('.', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end_matches(['(', '['])
            .trim_matches(|c: char| c == '-' || c == ' ')
            .to_string();

        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}
