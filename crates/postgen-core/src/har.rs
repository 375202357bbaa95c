//! HAR parsing utilities for deriving endpoint descriptors.
//!
//! Recorded network traffic (browser dev tools, proxies) is exported as HAR
//! (HTTP Archive). This module reads such a recording and turns each distinct
//! `(method, path)` pair into an [`EndpointDescriptor`], keeping the first
//! request's headers and body as the example for that endpoint.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use url::Url;

use crate::descriptor::{EndpointDescriptor, HeaderParam};
use crate::Error;

/// Headers that describe the recorded session rather than the endpoint
const SKIPPED_HEADERS: [&str; 1] = ["cookie"];

/// Top level structure for a HAR file.
#[derive(Debug, Deserialize)]
struct HarFile {
    log: HarLog,
}

#[derive(Debug, Deserialize)]
struct HarLog {
    entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
struct HarEntry {
    request: HarRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HarRequest {
    method: String,
    url: String,
    #[serde(default)]
    headers: Vec<HarHeader>,
    #[serde(default)]
    post_data: Option<HarPostData>,
}

#[derive(Debug, Deserialize)]
struct HarHeader {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct HarPostData {
    #[serde(default)]
    text: String,
}

/// Parsed representation of a HAR file.
pub struct HarContext {
    entries: Vec<HarEntry>,
}

impl HarContext {
    /// Load a HAR file from disk.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(&path).await?;
        Self::parse(&content).map_err(|e| {
            Error::har(format!("Failed to parse HAR {}: {}", path.as_ref().display(), e))
        })
    }

    /// Parse HAR JSON content.
    pub fn parse(content: &str) -> crate::Result<Self> {
        let har: HarFile = serde_json::from_str(content)?;
        Ok(Self {
            entries: har.log.entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return one descriptor per unique `(METHOD, path)`, in recording order.
    pub fn endpoint_descriptors(&self) -> Vec<EndpointDescriptor> {
        let mut descriptors = Vec::new();
        let mut seen = HashSet::new();

        for entry in &self.entries {
            let request = &entry.request;
            let url = match Url::parse(&request.url) {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("Skipping HAR entry with invalid URL {}: {}", request.url, e);
                    continue;
                }
            };
            if !matches!(url.scheme(), "http" | "https") {
                log::warn!("Skipping non-HTTP HAR entry {}", request.url);
                continue;
            }
            let method = request.method.to_uppercase();
            let path = url.path().to_string();
            if !seen.insert((method.clone(), path.clone())) {
                continue;
            }

            descriptors.push(EndpointDescriptor {
                base_url: url.origin().ascii_serialization(),
                method,
                path,
                body: request
                    .post_data
                    .as_ref()
                    .map(|data| data.text.clone())
                    .unwrap_or_default(),
                headers: request
                    .headers
                    .iter()
                    .filter(|h| !h.name.starts_with(':'))
                    .filter(|h| !SKIPPED_HEADERS.contains(&h.name.to_lowercase().as_str()))
                    .map(|h| HeaderParam::new(&h.name, &h.value))
                    .collect(),
                params: query_names(&url),
            });
        }
        descriptors
    }
}

// Unique query keys in first-occurrence order
fn query_names(url: &Url) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (key, _) in url.query_pairs() {
        if !names.iter().any(|n| *n == key) {
            names.push(key.into_owned());
        }
    }
    names
}
