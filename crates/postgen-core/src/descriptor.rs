//! Endpoint descriptors, the input of collection building.
//!
//! A descriptor describes one API call: where it goes, how, and with which
//! headers, body and query parameter names. Descriptors can be constructed in
//! code or loaded from a YAML/JSON descriptor file.
//!
//! # Examples
//!
//! ```
//! use postgen_core::descriptor::DescriptorFile;
//!
//! let file = DescriptorFile::parse(
//!     "base_url: https://api.example.com\nendpoints:\n  - method: GET\n    path: /users\n",
//! )
//! .unwrap();
//! let descriptors = file.into_descriptors();
//! assert_eq!(descriptors[0].base_url, "https://api.example.com");
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// One API endpoint to turn into a collection item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Host part of the request URL (e.g. `https://api.example.com`)
    #[serde(default)]
    pub base_url: String,

    /// HTTP method, kept verbatim
    #[serde(alias = "http_method")]
    pub method: String,

    /// `/`-delimited path template (e.g. `/users/{id}`)
    pub path: String,

    /// Raw request body
    #[serde(default)]
    pub body: String,

    /// Ordered request headers
    #[serde(default)]
    pub headers: Vec<HeaderParam>,

    /// Names of the query parameters the endpoint accepts
    #[serde(default)]
    pub params: Vec<String>,
}

/// A header key/value pair of an [`EndpointDescriptor`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderParam {
    pub key: String,
    pub value: String,
}

impl HeaderParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl EndpointDescriptor {
    /// Create a descriptor without headers, body or query parameters
    pub fn new(
        base_url: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderParam::new(key, value));
        self
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(params.into_iter().map(Into::into));
        self
    }
}

/// On-disk descriptor list, with an optional base URL shared by all endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default)]
    pub endpoints: Vec<EndpointDescriptor>,
}

impl DescriptorFile {
    /// Load a descriptor file (YAML or JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse(&content).map_err(|e| {
            Error::descriptor(format!(
                "Failed to parse descriptor file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse descriptor content, trying JSON first and then YAML
    pub fn parse(content: &str) -> crate::Result<Self> {
        if let Ok(file) = serde_json::from_str(content) {
            return Ok(file);
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Fill in the shared base URL where an endpoint does not set its own
    pub fn into_descriptors(self) -> Vec<EndpointDescriptor> {
        let base_url = self.base_url.unwrap_or_default();
        self.endpoints
            .into_iter()
            .map(|mut endpoint| {
                if endpoint.base_url.is_empty() {
                    endpoint.base_url.clone_from(&base_url);
                }
                endpoint
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const YAML: &str = r#"
base_url: https://api.example.com
endpoints:
  - method: POST
    path: /v1/users/
    body: "{}"
    headers:
      - { key: Content-Type, value: application/json }
      - { key: X-Trace, value: "1" }
    params: [limit, offset]
  - http_method: GET
    path: /v1/status
    base_url: https://status.example.com
"#;

    #[test]
    fn test_parse_yaml() -> crate::Result<()> {
        let descriptors = DescriptorFile::parse(YAML)?.into_descriptors();
        assert_eq!(descriptors.len(), 2);

        let users = &descriptors[0];
        assert_eq!(users.base_url, "https://api.example.com");
        assert_eq!(users.method, "POST");
        assert_eq!(users.body, "{}");
        assert_eq!(
            users.headers,
            vec![
                HeaderParam::new("Content-Type", "application/json"),
                HeaderParam::new("X-Trace", "1"),
            ]
        );
        assert_eq!(users.params, vec!["limit", "offset"]);

        let status = &descriptors[1];
        assert_eq!(status.method, "GET");
        assert_eq!(status.base_url, "https://status.example.com");
        assert!(status.headers.is_empty());
        assert!(status.params.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_json() -> crate::Result<()> {
        let file = DescriptorFile::parse(
            r#"{"endpoints": [{"method": "DELETE", "path": "/items/{id}"}]}"#,
        )?;
        assert_eq!(file.base_url, None);
        let descriptors = file.into_descriptors();
        assert_eq!(
            descriptors,
            vec![EndpointDescriptor::new("", "DELETE", "/items/{id}")]
        );
        Ok(())
    }

    #[test]
    fn test_builder_methods() {
        let descriptor = EndpointDescriptor::new("http://localhost", "PUT", "/a")
            .with_body("x")
            .with_header("K", "V")
            .with_params(["p", "q"]);
        assert_eq!(descriptor.body, "x");
        assert_eq!(descriptor.headers, vec![HeaderParam::new("K", "V")]);
        assert_eq!(descriptor.params, vec!["p".to_string(), "q".to_string()]);
    }

    #[tokio::test]
    async fn test_from_file_reports_path() -> crate::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.yaml");
        tokio::fs::write(&path, "endpoints: [ { method: GET } ]").await?;

        let err = DescriptorFile::from_file(&path).await.unwrap_err();
        assert!(matches!(err, Error::Descriptor(_)));
        assert!(err.to_string().contains("broken.yaml"));
        Ok(())
    }
}
