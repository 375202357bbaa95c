//! Error handling for the postgen library.
//!
//! Collection building itself cannot fail; this error type covers the edges
//! around it: reading descriptor sources, fetching remote OpenAPI documents and
//! writing the generated collection. It uses `thiserror` and converts from the
//! underlying I/O, parsing and HTTP errors.
//!
//! # Examples
//!
//! ```
//! use postgen_core::error::{Error, Result};
//!
//! fn load() -> Result<()> {
//!     Err(Error::descriptor("no endpoints"))
//! }
//!
//! assert!(load().is_err());
//! ```

use thiserror::Error;

/// Result type for postgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for postgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error while fetching a remote document
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// OpenAPI error
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// HAR error
    #[error("HAR error: {0}")]
    Har(String),

    /// Descriptor file error
    #[error("Descriptor error: {0}")]
    Descriptor(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new HAR error
    pub fn har<S: Into<String>>(msg: S) -> Self {
        Self::Har(msg.into())
    }

    /// Create a new descriptor error
    pub fn descriptor<S: Into<String>>(msg: S) -> Self {
        Self::Descriptor(msg.into())
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}
