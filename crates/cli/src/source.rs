//! Input retrieval for the two CSV sources.
//!
//! A source is either a local file or an HTTP(S) URL. Either way the caller
//! gets the whole document as a `String`, byte-order mark included (the
//! engine strips it), or a [`CliError`] carrying [`EXIT_INPUT`]. Retrieval
//! happens once per source, before any processing starts; there are no
//! retries.

use std::path::PathBuf;
use std::time::Duration;

use crate::exit_codes::{EXIT_ERROR, EXIT_INPUT};
use crate::CliError;

/// Where one input CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    File(PathBuf),
    Url(String),
}

impl TextSource {
    /// Pick a source from an optional path and an optional URL.
    /// Returns `None` when neither is set; callers reject both being set.
    pub fn from_parts(path: Option<PathBuf>, url: Option<String>) -> Option<Self> {
        match (path, url) {
            (Some(p), _) => Some(Self::File(p)),
            (None, Some(u)) => Some(Self::Url(u)),
            (None, None) => None,
        }
    }

    /// Retrieve the full text of this source.
    pub fn fetch(&self, client: &SourceClient) -> Result<String, CliError> {
        match self {
            Self::File(path) => std::fs::read_to_string(path)
                .map_err(|e| input_err(format!("cannot read {}: {e}", path.display()))),
            Self::Url(url) => client.get_text(url),
        }
    }
}

impl std::fmt::Display for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Blocking HTTP client shared by both URL sources.
pub struct SourceClient {
    http: reqwest::blocking::Client,
}

impl SourceClient {
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, CliError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| CliError {
                code: EXIT_ERROR,
                message: format!("cannot build HTTP client: {e}"),
                hint: None,
            })?;
        Ok(Self { http })
    }

    /// GET `url` and decode the body as UTF-8, replacing invalid sequences.
    fn get_text(&self, url: &str) -> Result<String, CliError> {
        tracing::info!(url, "downloading");
        let resp = self.http.get(url).send().map_err(|e| {
            let hint = if e.is_timeout() {
                Some("raise [http] timeout_secs in the config".to_string())
            } else {
                None
            };
            CliError {
                code: EXIT_INPUT,
                message: format!("GET {url} failed: {e}"),
                hint,
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(input_err(format!("GET {url} returned HTTP {}", status.as_u16())));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| input_err(format!("GET {url}: error reading body: {e}")))?;
        tracing::debug!(url, bytes = bytes.len(), "downloaded");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn input_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_INPUT, message: msg.into(), hint: None }
}
