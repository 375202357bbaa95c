//! OpenAPI specification loading and endpoint extraction.
//!
//! This module loads OpenAPI 3 (or Swagger 2) documents and derives one
//! [`EndpointDescriptor`] per operation, so that an API description can be
//! turned into a collection without writing descriptors by hand.
//!
//! # Examples
//!
//! ```no_run
//! use postgen_core::openapi::OpenApiContext;
//! use postgen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let spec = OpenApiContext::from_file("openapi.json").await?;
//!
//! if let Some(title) = spec.title() {
//!     println!("API Title: {}", title);
//! }
//! let descriptors = spec.endpoint_descriptors(None)?;
//! println!("{} endpoints", descriptors.len());
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::descriptor::{EndpointDescriptor, HeaderParam};
use crate::Error;

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tokio::fs;

/// HTTP methods an OpenAPI path item may define, in emission order
const METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Represents an OpenAPI specification
#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub struct OpenApiContext {
    /// The raw JSON value of the OpenAPI spec
    pub json: JsonValue,
}

impl OpenApiContext {
    /// Load a spec from a file or an http(s) URL (YAML or JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        Self::from_file(location).await
    }

    /// Load a spec from a file (YAML or JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse OpenAPI spec at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Fetch a spec over HTTP (YAML or JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await?;

        if !response.status().is_success() {
            return Err(Error::openapi(format!(
                "Failed to fetch OpenAPI spec from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await?;
        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!("Failed to parse OpenAPI spec from {}: {}", url, e))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        if let Ok(json) = serde_yaml::from_str(content) {
            return Ok(Self { json });
        }

        Err("content is neither valid JSON nor YAML".to_string())
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Get the base URL of the API
    pub fn base_path(&self) -> Option<String> {
        // OpenAPI 3.0+ servers
        if let Some(url) = self
            .json
            .get("servers")
            .and_then(JsonValue::as_array)
            .and_then(|servers| servers.first())
            .and_then(|server| server.get("url"))
            .and_then(JsonValue::as_str)
        {
            return Some(url.to_string());
        }

        // Swagger 2.0 host + basePath
        let host = self.json.get("host").and_then(JsonValue::as_str)?;
        let base_path = self
            .json
            .get("basePath")
            .and_then(JsonValue::as_str)
            .unwrap_or("");
        let scheme = match self.json.get("schemes").and_then(JsonValue::as_array) {
            Some(schemes) if schemes.iter().any(|s| s.as_str() == Some("https")) => "https",
            Some(schemes) => schemes.first().and_then(JsonValue::as_str).unwrap_or("https"),
            None => "https",
        };

        Some(format!("{}://{}{}", scheme, host, base_path))
    }

    /// Derive one descriptor per operation, in document order.
    ///
    /// `base_url` takes precedence over the servers declared by the spec.
    pub fn endpoint_descriptors(
        &self,
        base_url: Option<&str>,
    ) -> crate::Result<Vec<EndpointDescriptor>> {
        let paths = self
            .json
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::openapi("Missing 'paths' object"))?;
        let host = base_url
            .map(String::from)
            .or_else(|| self.base_path())
            .unwrap_or_default();

        let mut descriptors = Vec::new();
        for (path, item) in paths {
            for method in METHODS {
                let Some(operation) = item.get(method).filter(|op| op.is_object()) else {
                    continue;
                };
                let parameters = self.merge_parameters(item, operation);
                let descriptor = EndpointDescriptor {
                    base_url: host.clone(),
                    method: method.to_uppercase(),
                    path: path.clone(),
                    body: Self::request_body_example(operation),
                    headers: Self::header_params(&parameters),
                    params: Self::query_names(&parameters),
                };
                log::debug!("OpenAPI operation {} {}", descriptor.method, descriptor.path);
                descriptors.push(descriptor);
            }
        }
        Ok(descriptors)
    }

    /// Path-level parameters followed by operation-level ones; an operation
    /// parameter with the same name and location replaces the path-level one.
    /// `$ref` entries are resolved first; unresolvable ones are skipped.
    fn merge_parameters<'a>(
        &'a self,
        path_item: &'a JsonValue,
        operation: &'a JsonValue,
    ) -> Vec<&'a JsonValue> {
        let mut merged: Vec<&JsonValue> = Vec::new();
        let all = [path_item, operation]
            .into_iter()
            .filter_map(|v| v.get("parameters").and_then(JsonValue::as_array))
            .flatten()
            .filter_map(|param| self.resolve_ref(param));
        for param in all {
            let key = Self::param_key(param);
            match merged.iter().position(|p| Self::param_key(p) == key) {
                Some(index) => merged[index] = param,
                None => merged.push(param),
            }
        }
        merged
    }

    /// Follow a local `{"$ref": "#/..."}` to its target within the document
    fn resolve_ref<'a>(&'a self, value: &'a JsonValue) -> Option<&'a JsonValue> {
        match value.get("$ref").and_then(JsonValue::as_str) {
            Some(ref_str) => {
                let target = ref_str
                    .strip_prefix('#')
                    .and_then(|pointer| self.as_json().pointer(pointer));
                if target.is_none() {
                    log::warn!("Skipping unresolved parameter reference {}", ref_str);
                }
                target
            }
            None => Some(value),
        }
    }

    fn param_key(param: &JsonValue) -> (Option<&str>, Option<&str>) {
        (
            param.get("name").and_then(JsonValue::as_str),
            param.get("in").and_then(JsonValue::as_str),
        )
    }

    fn params_in<'a>(
        parameters: &'a [&'a JsonValue],
        location: &'a str,
    ) -> impl Iterator<Item = &'a JsonValue> + 'a {
        parameters
            .iter()
            .copied()
            .filter(move |p| p.get("in").and_then(JsonValue::as_str) == Some(location))
    }

    fn query_names(parameters: &[&JsonValue]) -> Vec<String> {
        Self::params_in(parameters, "query")
            .filter_map(|p| p.get("name").and_then(JsonValue::as_str))
            .map(String::from)
            .collect()
    }

    fn header_params(parameters: &[&JsonValue]) -> Vec<HeaderParam> {
        Self::params_in(parameters, "header")
            .filter_map(|p| {
                let name = p.get("name").and_then(JsonValue::as_str)?;
                let value = p
                    .get("example")
                    .or_else(|| p.get("schema").and_then(|s| s.get("example")))
                    .and_then(JsonValue::as_str)
                    .unwrap_or("");
                Some(HeaderParam::new(name, value))
            })
            .collect()
    }

    fn request_body_example(operation: &JsonValue) -> String {
        operation
            .get("requestBody")
            .and_then(|b| b.get("content"))
            .and_then(|c| c.get("application/json"))
            .and_then(|media| {
                media
                    .get("example")
                    .or_else(|| media.get("schema").and_then(|s| s.get("example")))
            })
            .and_then(|example| serde_json::to_string_pretty(example).ok())
            .unwrap_or_default()
    }
}
