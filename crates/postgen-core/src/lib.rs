//! postgen core library
//!
//! This library turns API endpoint descriptors into Postman collection
//! (schema v2.1.0) documents. Descriptors can be written by hand or derived
//! from OpenAPI specifications and HAR recordings.

pub mod builders;
pub mod collection;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod generate;
pub mod har;
pub mod openapi;

pub use crate::{
    builders::{build_body, build_document, build_header, build_item, build_url},
    collection::Collection,
    config::{Config, SourceKind},
    descriptor::{EndpointDescriptor, HeaderParam},
    error::{Error, Result},
    generate::generate,
    openapi::OpenApiContext,
};
