//! Builders turning endpoint descriptors into collection records.
//!
//! Every builder is a total function: it never fails and never touches shared
//! state, so callers may use them from any thread.
pub mod url;

pub use url::{build_query_param, build_url};

use crate::collection::{Body, Collection, Header, Item, ProtocolProfileBehavior, Request};
use crate::descriptor::EndpointDescriptor;

/// Header type tag understood by collection consumers
pub const HEADER_TYPE_TEXT: &str = "text";

/// Body mode for verbatim payloads
pub const BODY_MODE_RAW: &str = "raw";

/// Wrap a header pair; the display name mirrors the key
pub fn build_header(key: &str, value: &str) -> Header {
    Header {
        key: key.to_string(),
        value: value.to_string(),
        kind: HEADER_TYPE_TEXT.to_string(),
        name: key.to_string(),
    }
}

pub fn build_body(raw: &str) -> Body {
    Body {
        mode: BODY_MODE_RAW.to_string(),
        raw: raw.to_string(),
    }
}

/// Build the collection item for one endpoint.
///
/// The item is named after the path template exactly as given. Body pruning is
/// always disabled so clients keep bodies on GET-style requests too.
pub fn build_item(descriptor: &EndpointDescriptor) -> Item {
    let header = descriptor
        .headers
        .iter()
        .map(|h| build_header(&h.key, &h.value))
        .collect();

    let item = Item {
        name: descriptor.path.clone(),
        request: Request {
            method: descriptor.method.clone(),
            header,
            body: build_body(&descriptor.body),
            url: build_url(&descriptor.base_url, &descriptor.path, &descriptor.params),
        },
        response: None,
        protocol_profile_behavior: ProtocolProfileBehavior {
            disable_body_pruning: true,
        },
    };
    log::debug!(
        "Built item {} {} -> {}",
        item.request.method,
        item.name,
        item.request.url.raw
    );
    item
}

/// Build a collection with one item per descriptor, in input order.
///
/// Duplicate endpoints are kept as duplicate items.
pub fn build_document(name: &str, descriptors: &[EndpointDescriptor]) -> Collection {
    let items = descriptors.iter().map(build_item).collect();
    Collection::new(name, items)
}
