//! Configuration management for collection generation.
//!
//! This module defines the `Config` struct describing where endpoint
//! descriptors come from, what the collection is called and where it is
//! written. The configuration can be loaded from a YAML or JSON file, or
//! created programmatically.
//!
//! # Examples
//!
//! ```no_run
//! use postgen_core::config::{Config, SourceKind};
//!
//! // Create a new config programmatically
//! let mut config = Config::new("Petstore", "openapi.yaml", "petstore.postman.json");
//! config.source_kind = SourceKind::OpenApi;
//!
//! // Or load from a config file
//! # #[tokio::main]
//! # async fn main() -> postgen_core::Result<()> {
//! let config = Config::from_file("postgen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// Configuration for collection generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the generated collection
    #[serde(default)]
    pub collection_name: String,

    /// Path (or URL, for OpenAPI) of the descriptor source
    pub source_path: String,

    /// Format of the descriptor source
    #[serde(default)]
    pub source_kind: SourceKind,

    /// Where the collection JSON is written
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Host override for OpenAPI sources, default host for descriptor files
    #[serde(default)]
    pub base_url: Option<Url>,
}

/// Supported descriptor sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// YAML/JSON descriptor file
    #[default]
    Descriptors,
    /// OpenAPI 3 or Swagger 2 document
    OpenApi,
    /// HTTP Archive recording
    Har,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Descriptors => "descriptors",
            SourceKind::OpenApi => "openapi",
            SourceKind::Har => "har",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "descriptors" | "descriptor" => Ok(SourceKind::Descriptors),
            "openapi" | "swagger" => Ok(SourceKind::OpenApi),
            "har" => Ok(SourceKind::Har),
            other => Err(Error::config(format!("Unknown source kind: {other}"))),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new(
        collection_name: impl Into<String>,
        source_path: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            collection_name: collection_name.into(),
            source_path: source_path.into(),
            source_kind: SourceKind::default(),
            output_path: output_path.into(),
            base_url: None,
        }
    }

    /// Load configuration from a file (JSON when the extension is `.json`, YAML otherwise)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn default_output_path() -> String {
    "collection.json".to_string()
}
