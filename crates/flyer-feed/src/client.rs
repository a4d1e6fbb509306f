//! Feed client for loading product datasets.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{FeedError, Result};
use crate::record::Record;
use crate::schema;

/// Where a feed document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// An HTTP(S) endpoint serving the feed document.
    Url(String),
    /// A single JSON file on disk.
    Path(PathBuf),
    /// A directory whose `*.json` files are merged in filename order.
    Dir(PathBuf),
}

impl FeedSource {
    /// Classifies a location string into a feed source.
    ///
    /// `http://` and `https://` prefixes become [`FeedSource::Url`], an
    /// existing directory becomes [`FeedSource::Dir`], and anything else is
    /// treated as a file path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            return FeedSource::Url(location.to_string());
        }
        let path = Path::new(location);
        if path.is_dir() {
            FeedSource::Dir(path.to_path_buf())
        } else {
            FeedSource::Path(path.to_path_buf())
        }
    }
}

/// Client for loading a product feed into canonical records.
///
/// The client fetches the raw document(s), detects the schema variant once
/// per document, normalizes every element, and applies the configured
/// post-processing options.
#[derive(Debug, Clone)]
pub struct FeedClient {
    source: FeedSource,
    http_client: reqwest::Client,
    store_label: Option<String>,
    drop_unpriced: bool,
}

impl FeedClient {
    /// Creates a new client for the given source.
    pub fn new(source: FeedSource) -> Self {
        Self {
            source,
            http_client: reqwest::Client::new(),
            store_label: None,
            drop_unpriced: false,
        }
    }

    /// Creates a new client from a location string.
    ///
    /// See [`FeedSource::from_location`] for the classification rules.
    pub fn from_location(location: &str) -> Self {
        Self::new(FeedSource::from_location(location))
    }

    /// Stamps the given store name onto loaded records that lack one.
    pub fn with_store_label(mut self, label: impl Into<String>) -> Self {
        self.store_label = Some(label.into());
        self
    }

    /// Drops records without price text at load time.
    pub fn drop_unpriced(mut self) -> Self {
        self.drop_unpriced = true;
        self
    }

    /// Returns the configured feed source.
    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Loads the feed and returns the normalized records.
    ///
    /// # Errors
    ///
    /// Returns a fetch-class error ([`FeedError::Http`], [`FeedError::Network`],
    /// [`FeedError::Read`]) when the feed cannot be retrieved, and a
    /// parse-class error ([`FeedError::Parse`], [`FeedError::NotAnArray`])
    /// when the retrieved body cannot be interpreted. A single call makes a
    /// single attempt; retrying is the caller's decision.
    pub async fn load(&self) -> Result<Vec<Record>> {
        let mut records = match &self.source {
            FeedSource::Url(url) => {
                let body = self.fetch_url(url).await?;
                parse_document(&body)?
            }
            FeedSource::Path(path) => {
                let body = read_file(path).await?;
                parse_document(&body)?
            }
            FeedSource::Dir(dir) => self.load_dir(dir).await?,
        };

        if let Some(label) = &self.store_label {
            for record in &mut records {
                if record.store.is_none() {
                    record.store = Some(label.clone());
                }
            }
        }
        if self.drop_unpriced {
            records.retain(|record| record.current_price.is_some());
        }

        Ok(records)
    }

    /// Fetches the feed body over HTTP.
    async fn fetch_url(&self, url: &str) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FeedError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response.text().await.map_err(|e| FeedError::Network {
            message: e.to_string(),
        })
    }

    /// Merges every `*.json` file in the directory, in filename order.
    ///
    /// Files that are not valid JSON or whose root is not an array are
    /// skipped; the merge succeeds with whatever parsed.
    async fn load_dir(&self, dir: &Path) -> Result<Vec<Record>> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|source| read_error(dir, source))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| read_error(dir, source))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut merged = Vec::new();
        for path in paths {
            let body = read_file(&path).await?;
            if let Ok(records) = parse_document(&body) {
                merged.extend(records);
            }
        }
        Ok(merged)
    }
}

/// Parses a feed body into normalized records.
fn parse_document(body: &str) -> Result<Vec<Record>> {
    let root: Value = serde_json::from_str(body)?;
    let Value::Array(values) = root else {
        return Err(FeedError::NotAnArray);
    };

    let variant = schema::detect(&values);
    Ok(values
        .into_iter()
        .filter_map(|value| schema::normalize(variant, value))
        .collect())
}

/// Reads a file, attaching the path to any I/O error.
async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| read_error(path, source))
}

fn read_error(path: &Path, source: std::io::Error) -> FeedError {
    FeedError::Read {
        path: path.to_path_buf(),
        source,
    }
}
