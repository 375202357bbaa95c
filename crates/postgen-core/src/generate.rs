//! Collection generation driver

use crate::{
    builders::build_document,
    collection::Collection,
    config::{Config, SourceKind},
    descriptor::{DescriptorFile, EndpointDescriptor},
    error::Result,
    har::HarContext,
    openapi::OpenApiContext,
};

/// Main entry point: load descriptors, build the collection and write it out
pub async fn generate(config: &Config) -> Result<Collection> {
    // 1. Load endpoint descriptors from the configured source
    let descriptors = load_descriptors(config).await?;

    // 2. Build the collection document
    let collection = build_document(&config.collection_name, &descriptors);

    // 3. Write the collection JSON
    collection.save(&config.output_path).await?;

    Ok(collection)
}

/// Load endpoint descriptors from the source described by `config`
pub async fn load_descriptors(config: &Config) -> Result<Vec<EndpointDescriptor>> {
    let base_url = config.base_url.as_ref().map(base_url_string);
    log::debug!(
        "Loading {} source from {}",
        config.source_kind,
        config.source_path
    );

    let descriptors = match config.source_kind {
        SourceKind::Descriptors => {
            let mut file = DescriptorFile::from_file(&config.source_path).await?;
            if let Some(base_url) = base_url {
                file.base_url = Some(base_url);
            }
            file.into_descriptors()
        }
        SourceKind::OpenApi => OpenApiContext::from_file_or_url(&config.source_path)
            .await?
            .endpoint_descriptors(base_url.as_deref())?,
        SourceKind::Har => HarContext::from_file(&config.source_path)
            .await?
            .endpoint_descriptors(),
    };

    log::debug!("Loaded {} endpoint descriptors", descriptors.len());
    Ok(descriptors)
}

// `Url` always serializes a bare origin with a trailing slash
fn base_url_string(url: &url::Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use url::Url;

    fn fixture(rel: &str) -> String {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let base = manifest.parent().unwrap().parent().unwrap();
        base.join("tests/fixtures").join(rel).to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_generate_from_descriptors() -> Result<()> {
        let dir = tempdir()?;
        let output = dir.path().join("users.postman.json");
        let config = Config::new(
            "Users",
            fixture("descriptors/users.yaml"),
            output.to_string_lossy(),
        );

        let collection = generate(&config).await?;
        assert_eq!(collection.item.len(), 2);

        let reloaded = Collection::from_file(&output).await?;
        assert_eq!(reloaded, collection);

        let by_id = &reloaded.item[1];
        assert_eq!(by_id.name, "/v1/users/{id}");
        assert_eq!(by_id.request.url.raw, "https://api.example.com/v1/users/{id}");
        let keys: Vec<&str> = by_id.request.url.query.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["verbose"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_base_url_override_for_descriptors() -> Result<()> {
        let mut config = Config::new("Users", fixture("descriptors/users.yaml"), "unused.json");
        config.base_url = Some(Url::parse("http://localhost:8080/").unwrap());

        let descriptors = load_descriptors(&config).await?;
        assert!(descriptors.iter().all(|d| d.base_url == "http://localhost:8080"));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_openapi() -> Result<()> {
        let mut config = Config::new("Petstore", fixture("openapi/petstore.yaml"), "unused.json");
        config.source_kind = SourceKind::OpenApi;

        let descriptors = load_descriptors(&config).await?;
        let summary: Vec<(&str, &str)> = descriptors
            .iter()
            .map(|d| (d.method.as_str(), d.path.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("GET", "/pets"), ("POST", "/pets"), ("GET", "/pets/{petId}")]
        );
        assert_eq!(descriptors[0].base_url, "https://petstore.example.com/v3");

        let collection = build_document("Petstore", &descriptors);
        let pet = &collection.item[2].request.url;
        let keys: Vec<&str> = pet.query.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["expand"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_har() -> Result<()> {
        let mut config = Config::new("Recorded", fixture("har/sample.har"), "unused.json");
        config.source_kind = SourceKind::Har;

        let descriptors = load_descriptors(&config).await?;
        assert_eq!(descriptors.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_source() {
        let config = Config::new("Missing", "does/not/exist.yaml", "unused.json");
        assert!(matches!(
            load_descriptors(&config).await,
            Err(crate::Error::Io(_))
        ));
    }
}
