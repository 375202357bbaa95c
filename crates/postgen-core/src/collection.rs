//! Postman collection (schema v2.1.0) document model.
//!
//! These records mirror the on-disk JSON shape of a collection export. They are
//! plain values: the builders in [`crate::builders`] populate them once and
//! `serde` renders them. Field order in each struct is the field order of the
//! emitted JSON object.
//!
//! # Examples
//!
//! ```
//! use postgen_core::collection::Collection;
//!
//! let collection = Collection::new("Empty", Vec::new());
//! let json = collection.to_json_pretty().unwrap();
//! assert!(json.contains("\"_postman_id\": \"\""));
//! ```

// Internal imports (std, crate)
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tokio::fs;

/// Schema URI identifying collection format v2.1.0.
pub const SCHEMA_V2_1_0: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Top level collection document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: Info,
    pub item: Vec<Item>,
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// Always empty; consuming tools assign their own id on import
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    pub name: String,
    pub schema: String,
}

/// One request entry of the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Raw path template the item was built from
    pub name: String,
    pub request: Request,
    /// Captured sample responses; never populated, serialized as `null`
    pub response: Option<Vec<JsonValue>>,
    #[serde(default, skip_serializing_if = "ProtocolProfileBehavior::is_default")]
    pub protocol_profile_behavior: ProtocolProfileBehavior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub header: Vec<Header>,
    pub body: Body,
    pub url: Url,
}

/// HTTP header entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name, mirrors `key`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Query-string entry of a [`Url`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub mode: String,
    pub raw: String,
}

/// Canonical URL representation.
///
/// `raw` is the host joined with the path segments; it never carries the
/// query string, which lives in `query` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    pub query: Vec<QueryParam>,
}

/// Client-side protocol hints attached to an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolProfileBehavior {
    /// Keep the request body even for methods that usually have none (GET)
    pub disable_body_pruning: bool,
}

impl ProtocolProfileBehavior {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Collection {
    /// Create a collection with the v2.1.0 schema and an empty id
    pub fn new(name: impl Into<String>, item: Vec<Item>) -> Self {
        Self {
            info: Info {
                postman_id: String::new(),
                name: name.into(),
                schema: SCHEMA_V2_1_0.to_string(),
            },
            item,
        }
    }

    /// Render the collection as pretty-printed JSON
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a previously exported collection
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the collection to `path`, creating parent directories as needed
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, self.to_json_pretty()?).await?;
        log::info!(
            "Wrote collection '{}' ({} items) to {}",
            self.info.name,
            self.item.len(),
            path.display()
        );
        Ok(())
    }
}
