//! Command-line definitions

use crate::mapper::{MapperConfig, Preset};
use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// orthomap - ortholog gene mapping over Ensembl BioMart
#[derive(Parser, Debug)]
#[command(name = "orthomap")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// BioMart host (defaults to the configured or public Ensembl host)
    #[arg(long, env = "ORTHOMAP_HOST", global = true)]
    pub host: Option<String>,

    /// martservice path on the host
    #[arg(long, env = "ORTHOMAP_PATH", global = true)]
    pub path: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Map gene identifiers to orthologs in another species
    Map(MapArgs),

    /// List the marts served by the host
    Marts {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the datasets of a mart
    Datasets {
        /// Mart name
        #[arg(long, default_value = crate::mapper::config::DEFAULT_MART)]
        mart: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct MapArgs {
    /// Identifiers to map (defaults to the configuration's list)
    pub ids: Vec<String>,

    /// Species-pair preset to start from
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// TOML file with mapper settings, layered over the preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// File with one identifier per line
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub mart: Option<String>,

    #[arg(long)]
    pub source_dataset: Option<String>,

    #[arg(long)]
    pub target_dataset: Option<String>,

    /// Filter matching the identifiers (link_ensembl_gene_id for stable ids)
    #[arg(long)]
    pub source_filter: Option<String>,

    /// Extra source attributes, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub source_attributes: Option<Vec<String>>,

    /// Target attributes, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub target_attributes: Option<Vec<String>>,

    #[arg(long)]
    pub homolog_attribute: Option<String>,

    /// Output column for source gene ids
    #[arg(long)]
    pub source_id_name: Option<String>,

    /// Output column for target gene ids
    #[arg(long)]
    pub target_id_name: Option<String>,

    /// Identifiers per remote query
    #[arg(long, env = "ORTHOMAP_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Show a progress bar over batches
    #[arg(long)]
    pub progress: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl MapArgs {
    /// Apply command-line overrides on top of `config`
    pub fn apply_overrides(&self, mut config: MapperConfig) -> MapperConfig {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut config.mart, &self.mart);
        set(&mut config.source_dataset, &self.source_dataset);
        set(&mut config.target_dataset, &self.target_dataset);
        set(&mut config.source_filter, &self.source_filter);
        set(&mut config.source_attributes, &self.source_attributes);
        set(&mut config.target_attributes, &self.target_attributes);
        set(&mut config.homolog_attribute, &self.homolog_attribute);
        set(&mut config.source_id_name, &self.source_id_name);
        set(&mut config.target_id_name, &self.target_id_name);
        set(&mut config.chunk_size, &self.chunk_size);
        if self.progress {
            config.show_progress = true;
        }
        config
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Output format (default: table on a terminal, tsv otherwise)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Omit the header line in tsv/csv output
    #[arg(long)]
    pub no_header: bool,
}

impl OutputArgs {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_else(OutputFormat::detect)
    }
}
