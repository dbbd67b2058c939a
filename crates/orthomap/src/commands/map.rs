//! `orthomap map` command implementation

use super::server_config;
use crate::biomart::BiomartClient;
use crate::cli::{Cli, MapArgs};
use crate::error::Result;
use crate::mapper::{MapperConfig, OrthologMapper};
use crate::output;
use colored::Colorize;
use std::path::Path;
use tracing::{debug, info};

/// Run the map command
pub async fn run(cli: &Cli, args: &MapArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let server = server_config(cli, &config.host);
    let config = config.with_host(server.host.clone());
    config.validate()?;

    let identifiers = collect_identifiers(args)?;
    debug!(
        explicit = identifiers.as_ref().map_or(0, Vec::len),
        "Collected identifiers"
    );

    let client = BiomartClient::connect(&server).await?;
    let mapper = OrthologMapper::connect(client, config).await?;
    debug!(
        source = %mapper.source().display_name,
        target = %mapper.target().display_name,
        "Resolved datasets"
    );
    let table = mapper.map(identifiers.as_deref()).await?;

    let format = args.output.format();
    output::write(&table, format, args.output.no_header, args.output.output.as_deref())?;

    info!(rows = table.len(), %format, "Map command complete");
    match &args.output.output {
        Some(path) => eprintln!(
            "{} {} rows written to: {}",
            "✓".green(),
            table.len(),
            path.display().to_string().cyan()
        ),
        None => eprintln!("{} {} rows", "✓".green(), table.len()),
    }

    Ok(())
}

/// Layer preset, config file and flags, in that order
pub fn resolve_config(args: &MapArgs) -> Result<MapperConfig> {
    let mut config = args.preset.map(|p| p.config()).unwrap_or_default();

    if let Some(path) = &args.config {
        debug!(path = %path.display(), "Loading mapper config");
        let content = std::fs::read_to_string(path)?;
        config = config.merge_toml(&content)?;
    }

    Ok(args.apply_overrides(config))
}

/// Identifiers from the arguments and `--input`
///
/// `None` only when neither was given, so the preset's default genes are
/// mapped. An input file without identifiers maps nothing.
pub fn collect_identifiers(args: &MapArgs) -> Result<Option<Vec<String>>> {
    if args.ids.is_empty() && args.input.is_none() {
        return Ok(None);
    }

    let mut identifiers = args.ids.clone();
    if let Some(path) = &args.input {
        identifiers.extend(read_identifiers(path)?);
    }
    Ok(Some(identifiers))
}

/// Read one identifier per line, skipping blank lines and `#` comments
pub fn read_identifiers(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
