//! postgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use postgen_core::{Config, SourceKind};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "postgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a Postman collection from endpoint descriptors, an OpenAPI spec or a HAR file
    Generate {
        /// Config file (YAML or JSON); flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Path to the source document
        ///
        /// For OpenAPI sources this can also be an HTTP/HTTPS URL
        /// Example: --source api.yaml
        /// Example: --kind openapi --source https://example.com/openapi.json
        #[arg(long)]
        source: Option<String>,
        /// Source format (descriptors, openapi, har)
        #[arg(long)]
        kind: Option<String>,
        /// Collection name (default: source file stem)
        #[arg(long)]
        name: Option<String>,
        /// Output file for the collection JSON (default: collection.json)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Host used for every request, overriding the one from the source
        #[arg(long)]
        base_url: Option<Url>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            config,
            source,
            kind,
            name,
            output,
            base_url,
        } => {
            let config = resolve_config(config, source, kind, name, output, base_url).await?;
            tracing::info!(
                source = %config.source_path,
                kind = %config.source_kind,
                "Generating collection '{}'",
                config.collection_name
            );

            let collection = postgen_core::generate(&config)
                .await
                .with_context(|| format!("Failed to generate collection from {}", config.source_path))?;

            println!(
                "Wrote {} requests to {}",
                collection.item.len(),
                config.output_path
            );
        }
    }
    Ok(())
}

/// Merge the optional config file with command-line flags
async fn resolve_config(
    config_path: Option<PathBuf>,
    source: Option<String>,
    kind: Option<String>,
    name: Option<String>,
    output: Option<PathBuf>,
    base_url: Option<Url>,
) -> anyhow::Result<Config> {
    let mut config = match &config_path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            let source = source
                .clone()
                .context("Either --config or --source is required")?;
            Config::new("", source, "collection.json")
        }
    };

    if let Some(source) = source {
        config.source_path = source;
    }
    if let Some(kind) = kind {
        config.source_kind = kind
            .parse::<SourceKind>()
            .map_err(|e| anyhow::anyhow!("Invalid source kind '{kind}': {e}"))?;
    }
    if let Some(name) = name {
        config.collection_name = name;
    }
    if let Some(output) = output {
        config.output_path = output.to_string_lossy().to_string();
    }
    if base_url.is_some() {
        config.base_url = base_url;
    }
    if config.collection_name.is_empty() {
        config.collection_name = default_name(&config.source_path);
    }
    Ok(config)
}

fn default_name(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("collection")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flags_without_config() -> anyhow::Result<()> {
        let config = resolve_config(
            None,
            Some("specs/petstore.yaml".to_string()),
            Some("openapi".to_string()),
            None,
            Some(PathBuf::from("out/petstore.json")),
            None,
        )
        .await?;
        assert_eq!(config.collection_name, "petstore");
        assert_eq!(config.source_kind, SourceKind::OpenApi);
        assert_eq!(config.output_path, "out/petstore.json");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_source_is_rejected() {
        let result = resolve_config(None, None, None, None, None, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_kind_is_rejected() {
        let result = resolve_config(
            None,
            Some("api.yaml".to_string()),
            Some("wsdl".to_string()),
            None,
            None,
            None,
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "postgen",
            "generate",
            "--source",
            "api.har",
            "--kind",
            "har",
            "--base-url",
            "http://localhost:3000",
        ])
        .unwrap();
        let Commands::Generate {
            source, base_url, ..
        } = cli.command;
        assert_eq!(source.as_deref(), Some("api.har"));
        assert_eq!(base_url.unwrap().as_str(), "http://localhost:3000/");
    }
}
