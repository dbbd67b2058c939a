//! Mart registry and dataset list parsing

use super::{Dataset, Mart};
use crate::error::{OrthoError, Result};
use serde::Deserialize;

/// `<MartRegistry>` document root
#[derive(Debug, Deserialize)]
struct MartRegistry {
    #[serde(rename = "MartURLLocation", default)]
    locations: Vec<MartLocation>,
}

/// One `<MartURLLocation>` entry
#[derive(Debug, Deserialize)]
struct MartLocation {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@displayName", default)]
    display_name: String,
    #[serde(rename = "@database", default)]
    database: String,
    #[serde(rename = "@serverVirtualSchema", default = "default_virtual_schema")]
    virtual_schema: String,
}

fn default_virtual_schema() -> String {
    "default".to_string()
}

/// Parse the registry XML into marts, in document order
pub fn parse_registry(xml: &str) -> Result<Vec<Mart>> {
    let registry: MartRegistry = quick_xml::de::from_str(xml.trim())
        .map_err(|e| OrthoError::malformed(format!("unreadable mart registry: {}", e)))?;

    if registry.locations.is_empty() {
        return Err(OrthoError::malformed("mart registry lists no marts"));
    }

    Ok(registry
        .locations
        .into_iter()
        .map(|loc| Mart {
            name: loc.name,
            display_name: loc.display_name,
            database: loc.database,
            virtual_schema: loc.virtual_schema,
        })
        .collect())
}

/// Parse the tab-separated dataset list of `mart`
///
/// Field 2 holds the dataset name, field 3 its display name. Short lines
/// and lines without a name are skipped.
pub fn parse_datasets(tsv: &str, mart: &Mart) -> Result<Vec<Dataset>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(tsv.as_bytes());

    let mut datasets = Vec::new();
    for record in reader.records() {
        let record = record?;
        let (Some(name), Some(display_name)) = (record.get(1), record.get(2)) else {
            continue;
        };
        if name.trim().is_empty() {
            continue;
        }
        datasets.push(Dataset {
            name: name.trim().to_string(),
            display_name: display_name.trim().to_string(),
            mart: mart.name.clone(),
            virtual_schema: mart.virtual_schema.clone(),
        });
    }

    Ok(datasets)
}
