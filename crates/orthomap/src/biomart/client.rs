//! HTTP client for a BioMart `martservice` endpoint
//!
//! Provides mart registry lookup, dataset listing and TSV queries.

use super::{endpoints, query, registry, Dataset, Filters, Mart, MartService};
use crate::error::{OrthoError, Result};
use crate::table::Table;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Client Constants
// ============================================================================

/// Public Ensembl BioMart host
pub const DEFAULT_HOST: &str = "http://www.ensembl.org";

/// Path of the martservice endpoint on Ensembl hosts
pub const DEFAULT_PATH: &str = "/biomart/martservice";

/// Default request timeout in seconds.
/// Can be overridden via ORTHOMAP_TIMEOUT_SECS environment variable.
/// Large ortholog queries can take minutes to stream.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Where to reach the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub path: String,
    pub port: Option<u16>,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            path: DEFAULT_PATH.to_string(),
            port: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Create a config for `host` with the default path and timeout
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Default config with ORTHOMAP_PATH and ORTHOMAP_TIMEOUT_SECS applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_secs = lookup("ORTHOMAP_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let path = lookup("ORTHOMAP_PATH")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        Self {
            path,
            timeout_secs,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full martservice URL
    pub fn url(&self) -> Result<Url> {
        endpoints::martservice_url(&self.host, self.port, &self.path)
    }
}

/// Connected BioMart server
///
/// Holds the mart registry fetched at connect time. Dataset lists are
/// fetched on demand and not cached.
pub struct BiomartClient {
    client: Client,
    base_url: Url,
    marts: Vec<Mart>,
}

impl BiomartClient {
    /// Connect to the server and load its mart registry
    pub async fn connect(config: &ServerConfig) -> Result<Self> {
        let base_url = config.url()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("orthomap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(url = %base_url, "Fetching mart registry");
        let body = fetch_text(&client, &base_url, &endpoints::registry_params()).await?;
        let marts = registry::parse_registry(&body)?;
        tracing::info!(url = %base_url, marts = marts.len(), "Connected to BioMart server");

        Ok(Self {
            client,
            base_url,
            marts,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Marts listed by the server registry
    pub fn marts(&self) -> &[Mart] {
        &self.marts
    }

    /// Look up a mart by name
    pub fn mart(&self, name: &str) -> Result<&Mart> {
        self.marts
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| OrthoError::MartNotFound(name.to_string()))
    }

    /// List the datasets of a mart
    pub async fn list_datasets(&self, mart: &str) -> Result<Vec<Dataset>> {
        let mart = self.mart(mart)?;
        let body = fetch_text(
            &self.client,
            &self.base_url,
            &endpoints::datasets_params(&mart.name),
        )
        .await?;
        let datasets = registry::parse_datasets(&body, mart)?;
        tracing::debug!(mart = %mart.name, datasets = datasets.len(), "Listed datasets");
        Ok(datasets)
    }
}

#[async_trait]
impl MartService for BiomartClient {
    async fn dataset(&self, mart: &str, name: &str) -> Result<Dataset> {
        self.list_datasets(mart)
            .await?
            .into_iter()
            .find(|d| d.name == name)
            .ok_or_else(|| OrthoError::dataset_not_found(mart, name))
    }

    async fn query(&self, dataset: &Dataset, attributes: &[String], filters: &Filters) -> Result<Table> {
        let xml = query::build_query_xml(dataset, attributes, filters)?;
        tracing::debug!(dataset = %dataset.name, query = %xml, "Sending BioMart query");

        let body = fetch_text(&self.client, &self.base_url, &endpoints::query_params(xml)).await?;
        let table = query::parse_response(&body, attributes)?;

        tracing::debug!(dataset = %dataset.name, rows = table.len(), "Query returned");
        Ok(table)
    }
}

async fn fetch_text(client: &Client, url: &Url, params: &[(&'static str, String)]) -> Result<String> {
    let response = client
        .get(url.clone())
        .query(params)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.text().await?)
}
