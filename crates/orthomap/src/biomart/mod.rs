//! BioMart directory and query service
//!
//! The mapper talks to the remote service only through [`MartService`]:
//! dataset lookup by mart and name, and attribute queries with optional
//! filters. [`BiomartClient`] implements it over the `martservice` HTTP
//! interface; tests substitute an in-memory implementation.

pub mod client;
pub mod endpoints;
pub mod query;
pub mod registry;

pub use client::{BiomartClient, ServerConfig};

use crate::error::Result;
use crate::table::Table;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter that matches Ensembl stable gene ids directly
pub const LINK_FILTER: &str = "link_ensembl_gene_id";

/// Attribute holding a dataset's Ensembl stable gene id
pub const GENE_ID_ATTRIBUTE: &str = "ensembl_gene_id";

/// Filter name to accepted values
pub type Filters = BTreeMap<String, Vec<String>>;

/// A named collection of datasets served by a BioMart host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mart {
    pub name: String,
    pub display_name: String,
    pub database: String,
    pub virtual_schema: String,
}

/// Handle on one queryable species table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub display_name: String,
    /// Mart the dataset belongs to
    pub mart: String,
    pub virtual_schema: String,
}

/// Remote directory and query operations the mapper depends on
#[async_trait]
pub trait MartService: Send + Sync {
    /// Resolve a dataset by mart and dataset name
    async fn dataset(&self, mart: &str, name: &str) -> Result<Dataset>;

    /// Fetch `attributes` from `dataset`, restricted by `filters`
    ///
    /// The result has exactly one column per requested attribute, named by
    /// the attribute.
    async fn query(&self, dataset: &Dataset, attributes: &[String], filters: &Filters)
        -> Result<Table>;
}
