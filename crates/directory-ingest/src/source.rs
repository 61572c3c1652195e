//! Record sources.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::debug;

use directory_model::Record;

use crate::document::parse_document;
use crate::error::{FetchError, Result};

/// HTTP request timeout used when none is configured.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A read-only endpoint producing the full record collection.
pub trait RecordSource {
    /// Human-readable location for logs.
    fn describe(&self) -> String;

    /// Fetch and decode every record.
    fn fetch(&self) -> Result<Vec<Record>>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn fetch(&self) -> Result<Vec<Record>> {
        (**self).fetch()
    }
}

/// Fetches the companies document over HTTP.
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecordSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<Record>> {
        debug!(url = %self.url, "fetching companies");
        let network = |source| FetchError::Network {
            url: self.url.clone(),
            source,
        };
        let response = self
            .client
            .get(&self.url)
            .header(
                USER_AGENT,
                format!("company-directory/{}", env!("CARGO_PKG_VERSION")),
            )
            .header(ACCEPT, "application/json")
            .send()
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().map_err(network)?;
        Ok(parse_document(&body)?.companies)
    }
}

/// Reads the companies document from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<Record>> {
        debug!(path = %self.path.display(), "reading companies");
        let body = fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(parse_document(&body)?.companies)
    }
}

/// Pick a source for a configured location.
///
/// `http://` and `https://` locations are fetched over the network;
/// anything else is treated as a file path.
pub fn source_for_location(location: &str, timeout: Duration) -> Result<Box<dyn RecordSource>> {
    let trimmed = location.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(Box::new(HttpSource::new(trimmed, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(trimmed)))
    }
}
