//! Static mapper configuration

use crate::biomart::client::DEFAULT_HOST;
use crate::error::{OrthoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of identifiers per remote query
pub const DEFAULT_CHUNK_SIZE: usize = 300;

/// Catalog holding the Ensembl gene datasets
pub const DEFAULT_MART: &str = "ENSEMBL_MART_ENSEMBL";

/// Everything an [`OrthologMapper`](super::OrthologMapper) needs, fixed for
/// its lifetime
///
/// Missing fields in a TOML file fall back to the human to mouse setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub host: String,
    pub mart: String,
    pub source_dataset: String,
    pub target_dataset: String,
    /// Filter applied to the source identifiers; `link_ensembl_gene_id`
    /// matches stable gene ids directly
    pub source_filter: String,
    pub source_attributes: Vec<String>,
    pub target_attributes: Vec<String>,
    /// Source attribute carrying the target species' gene id
    pub homolog_attribute: String,
    pub source_id_name: String,
    pub target_id_name: String,
    pub chunk_size: usize,
    /// Used when `map` is called without identifiers
    pub identifiers: Vec<String>,
    pub show_progress: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        super::presets::human_to_mouse()
    }
}

impl MapperConfig {
    /// Read a config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay the keys present in `content` on top of `self`
    ///
    /// Keys absent from `content` keep their current values, so a partial
    /// file can refine a preset.
    pub fn merge_toml(self, content: &str) -> Result<Self> {
        let overlay: toml::Table = toml::from_str(content)?;
        let mut base = toml::Value::try_from(&self).map_err(|e| OrthoError::config(e.to_string()))?;
        if let toml::Value::Table(table) = &mut base {
            for (key, value) in overlay {
                table.insert(key, value);
            }
        }
        Ok(base.try_into()?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| OrthoError::config(e.to_string()))
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_identifiers(mut self, identifiers: Vec<String>) -> Self {
        self.identifiers = identifiers;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check the values that have no meaningful fallback
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(OrthoError::config("chunk_size must be positive"));
        }

        let required = [
            ("host", &self.host),
            ("mart", &self.mart),
            ("source_dataset", &self.source_dataset),
            ("target_dataset", &self.target_dataset),
            ("source_filter", &self.source_filter),
            ("homolog_attribute", &self.homolog_attribute),
            ("source_id_name", &self.source_id_name),
            ("target_id_name", &self.target_id_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(OrthoError::config(format!("{} must not be empty", field)));
            }
        }

        if self.source_id_name == self.target_id_name {
            return Err(OrthoError::config(
                "source_id_name and target_id_name must differ",
            ));
        }

        Ok(())
    }
}

pub(crate) fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
