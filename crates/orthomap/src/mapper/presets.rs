//! Ready-made human/mouse configurations

use super::config::{default_host, MapperConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MART};
use crate::biomart::LINK_FILTER;
use serde::{Deserialize, Serialize};

const HUMAN_DATASET: &str = "hsapiens_gene_ensembl";
const MOUSE_DATASET: &str = "mmusculus_gene_ensembl";
const HUMAN_ID: &str = "human_ensembl_gene_id";
const MOUSE_ID: &str = "mouse_ensembl_gene_id";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// HGNC symbols to mouse gene ids and names
pub fn human_to_mouse() -> MapperConfig {
    MapperConfig {
        host: default_host(),
        mart: DEFAULT_MART.to_string(),
        source_dataset: HUMAN_DATASET.to_string(),
        target_dataset: MOUSE_DATASET.to_string(),
        source_filter: "hgnc_symbol".to_string(),
        source_attributes: strings(&["hgnc_symbol"]),
        target_attributes: strings(&["external_gene_name"]),
        homolog_attribute: "mmusculus_homolog_ensembl_gene".to_string(),
        source_id_name: HUMAN_ID.to_string(),
        target_id_name: MOUSE_ID.to_string(),
        chunk_size: DEFAULT_CHUNK_SIZE,
        identifiers: strings(&["TP53", "TERT", "EPCAM"]),
        show_progress: false,
    }
}

/// Mouse gene ids to human gene ids and HGNC symbols
pub fn mouse_to_human() -> MapperConfig {
    MapperConfig {
        host: default_host(),
        mart: DEFAULT_MART.to_string(),
        source_dataset: MOUSE_DATASET.to_string(),
        target_dataset: HUMAN_DATASET.to_string(),
        source_filter: LINK_FILTER.to_string(),
        source_attributes: strings(&["external_gene_name"]),
        target_attributes: strings(&["hgnc_symbol"]),
        homolog_attribute: "hsapiens_homolog_ensembl_gene".to_string(),
        source_id_name: MOUSE_ID.to_string(),
        target_id_name: HUMAN_ID.to_string(),
        chunk_size: DEFAULT_CHUNK_SIZE,
        identifiers: strings(&["ENSMUSG00000059552", "ENSMUSG00000021611"]),
        show_progress: false,
    }
}

/// Named species-pair direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    HumanToMouse,
    MouseToHuman,
}

impl Preset {
    pub fn config(self) -> MapperConfig {
        match self {
            Preset::HumanToMouse => human_to_mouse(),
            Preset::MouseToHuman => mouse_to_human(),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::HumanToMouse => write!(f, "human-to-mouse"),
            Preset::MouseToHuman => write!(f, "mouse-to-human"),
        }
    }
}
