//! Metadata lookup boundary.
//!
//! The record only needs something that turns a title/year pair into a
//! [`LookupResponse`]; the HTTP client lives in `cinefile-omdb`.

mod enrich;

pub use enrich::RATING_SOURCE;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::LookupError;
use crate::types::{MediaKind, MediaRecord};

/// What is sent to the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupQuery {
    pub title: String,
    pub year: Option<u16>,
    pub kind: MediaKind,
}

impl LookupQuery {
    pub fn from_record(record: &MediaRecord) -> Self {
        Self {
            title: record.title.clone(),
            year: record.year,
            kind: record.kind,
        }
    }
}

/// One `{ "Source": ..., "Value": ... }` entry of the `Ratings` list.
///
/// Either side may be missing or of the wrong type; such an entry never
/// yields a rating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RatingEntry {
    #[serde(
        rename = "Source",
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    #[serde(
        rename = "Value",
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
}

/// Lookup service response (OMDb title lookup document).
///
/// Only `Response` is required. Everything else may be absent, notably on
/// `"Response": "False"` answers, which carry an `Error` message instead.
/// A field holding something other than text decodes as absent, so a
/// malformed document still reaches enrichment and resets the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(
        rename = "imdbID",
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub imdb_id: Option<String>,
    #[serde(
        rename = "Title",
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        rename = "Year",
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(rename = "Ratings", default, deserialize_with = "rating_list")]
    pub ratings: Vec<RatingEntry>,
    #[serde(
        rename = "Error",
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl LookupResponse {
    /// The service's own status flag.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// Value of the first rating whose source label equals `source`.
    #[must_use]
    pub fn rating_from(&self, source: &str) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.source.as_deref() == Some(source))
            .and_then(|r| r.value.as_deref())
    }
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Non-list `Ratings` decode as empty; entries that are not objects are dropped.
fn rating_list<'de, D>(deserializer: D) -> Result<Vec<RatingEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// A service that resolves a title/year pair to canonical metadata.
pub trait MetadataLookup {
    fn lookup(&self, query: &LookupQuery) -> Result<LookupResponse, LookupError>;
}
