//! Command implementations.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncRead;

use super::{Cli, Commands};
use crate::artifact::{Bundle, OutputRoute, RequestContext};
use crate::config::WriterConfig;
use crate::log;
use crate::output::{OutputIdentity, resolve_output_file};
use crate::utils::mime;
use crate::utils::path::absolutize;
use crate::writer::FileWriter;

type Input = Box<dyn AsyncRead + Unpin + Send>;

/// Run the parsed command line.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let writer = FileWriter::new(config).context("Invalid writer configuration")?;

    match &cli.command {
        Commands::Bundle {
            name,
            content_type,
            slot,
            sources,
            checksum,
            input,
        } => {
            let input_path = input.as_deref().filter(|p| *p != Path::new("-"));
            let content_type = content_type.clone().unwrap_or_else(|| {
                mime::from_path(input_path.unwrap_or(Path::new(name))).to_string()
            });

            let mut bundle = Bundle::new(name, content_type).with_sources(sources);
            if let Some(slot) = slot {
                bundle = bundle.with_slot(slot);
            }
            if let Some(enabled) = checksum {
                bundle = bundle.with_checksums_enabled(*enabled);
            }

            let reader = open_input(input_path).await?;
            let route = writer
                .ensure_bundle(reader, &mut bundle, &RequestContext::default())
                .await
                .with_context(|| format!("Failed to write bundle `{name}`"))?;
            report(cli, "bundle", &route)
        }

        Commands::Resource { path, stylesheet } => {
            let path = absolutize(path);
            let owner = stylesheet
                .as_ref()
                .map(|rel| Bundle::new("stylesheet", mime::types::CSS).with_relative_output_path(rel));
            let ctx = match &owner {
                Some(bundle) => RequestContext::referenced_from(bundle),
                None => RequestContext::default(),
            };

            let route = writer
                .ensure_resource(&path, &ctx)
                .await
                .with_context(|| format!("Failed to write resource `{}`", path.display()))?;
            report(cli, "resource", &route)
        }

        Commands::Url { file } => {
            let file = absolutize(file);
            let url = writer.resource_url(&file, &RequestContext::default())?;
            println!("{url}");
            Ok(())
        }

        Commands::Resolve {
            name,
            checksum,
            ext,
            slot,
        } => {
            let identity = OutputIdentity {
                relative_path: None,
                filename: Some(name),
                checksum: checksum.as_deref(),
                target_ext: ext.as_deref(),
                slot: slot.as_deref(),
            };
            let output_file = resolve_output_file(writer.config(), &identity)?;
            println!("{}", output_file.display());
            Ok(())
        }
    }
}

/// Load the config file, then apply command line overrides.
fn load_config(cli: &Cli) -> Result<WriterConfig> {
    let mut config = WriterConfig::load(&cli.config)
        .with_context(|| format!("Failed to load `{}`", cli.config.display()))?;

    if let Some(output) = &cli.output {
        config.output_dir = absolutize(output);
    }
    if let Some(prefix) = &cli.url_prefix {
        config.url_prefix = Some(prefix.clone());
    }
    if let Some(enabled) = cli.checksums {
        config.checksums_enabled = Some(enabled);
    }

    config.validate()?;
    Ok(config)
}

async fn open_input(path: Option<&Path>) -> Result<Input> {
    Ok(match path {
        Some(path) => Box::new(
            File::open(path)
                .await
                .with_context(|| format!("Failed to open `{}`", path.display()))?,
        ),
        None => Box::new(tokio::io::stdin()),
    })
}

fn report(cli: &Cli, kind: &str, route: &OutputRoute) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(route)?);
    } else {
        log!("write"; "{} → {}", kind, route.output_file.display());
        println!("{}", route.url);
    }
    Ok(())
}
