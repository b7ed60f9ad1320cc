//! # Cinefile OMDb
//!
//! Blocking client for the OMDb title lookup endpoint. Implements
//! [`MetadataLookup`] so records can be enriched with canonical titles,
//! years, IMDb identifiers and ratings.

use std::time::Duration;

use cinefile_core::{LookupError, LookupQuery, LookupResponse, MetadataLookup};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// OMDb client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// Static API key sent with every request.
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl OmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Zero is bumped to one second.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    config: OmdbConfig,
}

impl OmdbClient {
    /// Create a new OMDb client.
    ///
    /// # Errors
    ///
    /// `LookupError::NotConfigured` for an empty API key or base URL, and
    /// `LookupError::Http` if the HTTP client cannot be built.
    pub fn new(config: OmdbConfig) -> Result<Self, LookupError> {
        if config.api_key.trim().is_empty() {
            return Err(LookupError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }
        if config.base_url.trim().is_empty() {
            return Err(LookupError::NotConfigured(
                "OMDb base URL is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(http_error)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OmdbConfig {
        &self.config
    }

    /// Query string for a lookup: key, title, then year and type when known.
    pub fn query_params(&self, query: &LookupQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", self.config.api_key.clone()),
            ("t", query.title.clone()),
        ];
        if let Some(year) = query.year {
            params.push(("y", year.to_string()));
        }
        if let Some(kind) = query.kind.lookup_type() {
            params.push(("type", kind.to_string()));
        }
        params
    }
}

impl MetadataLookup for OmdbClient {
    fn lookup(&self, query: &LookupQuery) -> Result<LookupResponse, LookupError> {
        debug!(
            "OMDb lookup: title='{}', year={:?}, kind={:?}",
            query.title, query.year, query.kind
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.query_params(query))
            .send()
            .map_err(http_error)?;

        let status = response.status();
        let body = response.text().map_err(http_error)?;

        if !status.is_success() {
            // OMDb explains most failures (bad key, quota) in a JSON `Error` field.
            let message = serde_json::from_str::<LookupResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn http_error(e: reqwest::Error) -> LookupError {
    LookupError::Http(e.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use cinefile_core::{ImdbId, MediaKind, MediaRecord};

    use super::*;

    /// Serves one canned HTTP response and reports the request line it got.
    fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let reply = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let request = String::from_utf8_lossy(&request).into_owned();
            let line = request.lines().next().unwrap_or_default().to_string();
            stream.write_all(reply.as_bytes()).unwrap();
            let _ = tx.send(line);
        });

        (format!("http://{addr}/"), rx)
    }

    fn client(base_url: &str) -> OmdbClient {
        OmdbClient::new(OmdbConfig::new("k3y").with_base_url(base_url)).unwrap()
    }

    fn heat_query() -> LookupQuery {
        LookupQuery {
            title: "Heat".into(),
            year: Some(1995),
            kind: MediaKind::Movie,
        }
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = OmdbClient::new(OmdbConfig::new("  ")).err().unwrap();
        assert!(matches!(err, LookupError::NotConfigured(_)));

        let err = OmdbClient::new(OmdbConfig::new("k").with_base_url(""))
            .err()
            .unwrap();
        assert!(matches!(err, LookupError::NotConfigured(_)));
    }

    #[test]
    fn config_defaults_and_builders() {
        let config = OmdbConfig::new("k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.with_timeout_secs(0).timeout_secs, 1);

        let config: OmdbConfig = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
        assert_eq!(config, OmdbConfig::new("k"));
    }

    #[test]
    fn query_params_skip_unknown_fields() {
        let c = client(DEFAULT_BASE_URL);

        let params = c.query_params(&heat_query());
        assert_eq!(
            params,
            vec![
                ("apikey", "k3y".to_string()),
                ("t", "Heat".to_string()),
                ("y", "1995".to_string()),
                ("type", "movie".to_string()),
            ]
        );

        let params = c.query_params(&LookupQuery {
            title: "Heat".into(),
            year: None,
            kind: MediaKind::Media,
        });
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn lookup_decodes_found_title() {
        let body = r#"{"Title":"Heat","Year":"1995","Ratings":[{"Source":"Internet Movie Database","Value":"8.3/10"}],"imdbID":"tt0113277","Response":"True"}"#;
        let (url, requests) = serve_once("200 OK", body);
        let c = client(&url);

        let mut record = MediaRecord::movie("/films/Heat.mkv");
        record.year = Some(1995);
        assert!(record.search_imdb_id(&c).unwrap());
        assert_eq!(record.id, Some(ImdbId(113277)));
        assert_eq!(record.rating.as_deref(), Some("8.3/10"));

        let line = requests.recv().unwrap();
        assert!(line.starts_with("GET /?"), "{line}");
        assert!(line.contains("apikey=k3y"), "{line}");
        assert!(line.contains("t=Heat"), "{line}");
        assert!(line.contains("y=1995"), "{line}");
        assert!(line.contains("type=movie"), "{line}");
    }

    #[test]
    fn lookup_reports_not_found_flag() {
        let (url, _requests) = serve_once("200 OK", r#"{"Response":"False","Error":"Movie not found!"}"#);
        let response = client(&url).lookup(&heat_query()).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn non_success_status_carries_service_message() {
        let (url, _requests) = serve_once(
            "401 Unauthorized",
            r#"{"Response":"False","Error":"Invalid API key!"}"#,
        );
        let err = client(&url).lookup(&heat_query()).unwrap_err();
        match err {
            LookupError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key!");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_fields_reset_id_without_error() {
        let body = r#"{"Title":"Heat","Year":"1995","Ratings":[{"Source":"Internet Movie Database"}],"imdbID":"tt0113277","Response":"True"}"#;
        let (url, _requests) = serve_once("200 OK", body);
        let mut record = MediaRecord::movie("/films/Heat.mkv");
        record.id = Some(ImdbId(42));

        assert!(record.search_imdb_id(&client(&url)).unwrap());
        assert_eq!(record.id, None);
        assert_eq!(record.rating, None);

        let body = r#"{"Title":"Heat","Year":1995,"Ratings":"n/a","imdbID":"tt0113277","Response":"False"}"#;
        let (url, _requests) = serve_once("200 OK", body);
        let mut record = MediaRecord::movie("/films/Heat.mkv");
        record.id = Some(ImdbId(42));

        assert!(!record.search_imdb_id(&client(&url)).unwrap());
        assert_eq!(record.id, None);
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let (url, _requests) = serve_once("200 OK", "<html>oops</html>");
        let err = client(&url).lookup(&heat_query()).unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }
}
