//! Ortholog mapping pipeline
//!
//! Each batch of source identifiers goes through three lookups against the
//! remote service:
//!
//! 1. source identifiers to source stable gene ids
//! 2. source gene ids to target homolog ids
//! 3. homolog ids to target attributes and target gene ids
//!
//! The three tables are outer-merged so identifiers that fail to match at
//! any stage stay in the output with missing values, and the per-batch
//! tables are concatenated in batch order.

pub mod config;
pub mod presets;

pub use config::MapperConfig;
pub use presets::{human_to_mouse, mouse_to_human, Preset};

use crate::batch::batches;
use crate::biomart::{
    BiomartClient, Dataset, Filters, MartService, ServerConfig, GENE_ID_ATTRIBUTE, LINK_FILTER,
};
use crate::error::Result;
use crate::progress::batch_progress;
use crate::table::Table;
use std::collections::HashSet;
use tracing::Instrument;

/// Maps identifiers of one species to orthologous genes of another
pub struct OrthologMapper<S> {
    service: S,
    config: MapperConfig,
    source: Dataset,
    target: Dataset,
}

impl OrthologMapper<BiomartClient> {
    /// Connect to `config.host` and build a mapper over it
    pub async fn from_config(config: MapperConfig) -> Result<Self> {
        config.validate()?;
        let server = ServerConfig {
            host: config.host.clone(),
            ..ServerConfig::from_env()
        };
        let client = BiomartClient::connect(&server).await?;
        Self::connect(client, config).await
    }
}

impl<S: MartService> OrthologMapper<S> {
    /// Validate `config` and resolve both dataset handles
    pub async fn connect(service: S, config: MapperConfig) -> Result<Self> {
        config.validate()?;

        let source = service.dataset(&config.mart, &config.source_dataset).await?;
        let target = service.dataset(&config.mart, &config.target_dataset).await?;

        tracing::info!(
            source = %source.name,
            target = %target.name,
            chunk_size = config.chunk_size,
            "Ortholog mapper ready"
        );

        Ok(Self {
            service,
            config,
            source,
            target,
        })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn source(&self) -> &Dataset {
        &self.source
    }

    pub fn target(&self) -> &Dataset {
        &self.target
    }

    /// Map `identifiers`, or the configured default list when `None`
    ///
    /// Batches run one after another; the first failing query aborts the
    /// whole call.
    pub async fn map(&self, identifiers: Option<&[String]>) -> Result<Table> {
        let identifiers = identifiers.unwrap_or(&self.config.identifiers);
        let split = batches(identifiers, self.config.chunk_size);
        let total = split.len();

        tracing::info!(
            identifiers = identifiers.len(),
            batches = total,
            "Mapping {} to {}",
            self.source.name,
            self.target.name
        );

        let progress = batch_progress(total as u64, "Mapping orthologs", self.config.show_progress);
        let mut output = Table::default();

        for (index, batch) in split.enumerate() {
            let span = tracing::info_span!("batch", index, size = batch.len());
            let table = self.map_batch(batch).instrument(span).await?;
            output.append(table);
            progress.inc(1);
        }

        progress.finish_and_clear();
        tracing::info!(rows = output.len(), "Mapping finished");
        Ok(output)
    }

    async fn map_batch(&self, batch: &[String]) -> Result<Table> {
        let source_ids = self.resolve_source_ids(batch).await?;
        let ids = source_ids.distinct_values(&self.config.source_id_name)?;
        tracing::debug!(matched = ids.len(), "Resolved source gene ids");

        let homologs = self.lookup_homologs(&ids).await?;
        let homolog_ids = homologs.distinct_values(&self.config.homolog_attribute)?;
        tracing::debug!(homologs = homolog_ids.len(), "Resolved homologs");

        let targets = self.resolve_targets(&homolog_ids).await?;
        tracing::debug!(targets = targets.len(), "Resolved target attributes");

        assemble(&self.config, &targets, &homologs, &source_ids)
    }

    /// Step 1: source identifiers to source gene ids
    ///
    /// Filters the service cannot apply itself are applied here, after
    /// fetching the filter attribute for every gene in the source dataset.
    /// That whole-dataset query carries only the filter attribute and the
    /// gene id; `source_attributes` are requested on the link filter path.
    async fn resolve_source_ids(&self, batch: &[String]) -> Result<Table> {
        let config = &self.config;

        let mut table = if config.source_filter == LINK_FILTER {
            let mut attributes = config.source_attributes.clone();
            attributes.push(GENE_ID_ATTRIBUTE.to_string());
            self.query_linked(&self.source, attributes, batch).await?
        } else {
            let attributes = vec![config.source_filter.clone(), GENE_ID_ATTRIBUTE.to_string()];

            tracing::debug!(
                dataset = %self.source.name,
                filter = %config.source_filter,
                "Fetching unfiltered source table for client-side filtering"
            );
            let mut table = self
                .service
                .query(&self.source, &attributes, &Filters::new())
                .await?;
            let wanted: HashSet<&str> = batch.iter().map(String::as_str).collect();
            table.retain_rows_in(&config.source_filter, &wanted)?;
            table
        };

        table.rename_column(GENE_ID_ATTRIBUTE, &config.source_id_name);
        Ok(table)
    }

    /// Step 2: source gene ids to homolog ids
    async fn lookup_homologs(&self, source_ids: &[String]) -> Result<Table> {
        let attributes = vec![
            GENE_ID_ATTRIBUTE.to_string(),
            self.config.homolog_attribute.clone(),
        ];
        let mut table = self.query_linked(&self.source, attributes, source_ids).await?;
        table.rename_column(GENE_ID_ATTRIBUTE, &self.config.source_id_name);
        Ok(table)
    }

    /// Step 3: homolog ids to target attributes
    async fn resolve_targets(&self, homolog_ids: &[String]) -> Result<Table> {
        let mut attributes = self.config.target_attributes.clone();
        attributes.push(GENE_ID_ATTRIBUTE.to_string());
        let mut table = self.query_linked(&self.target, attributes, homolog_ids).await?;
        table.rename_column(GENE_ID_ATTRIBUTE, &self.config.target_id_name);
        Ok(table)
    }

    /// Query `dataset` restricted to the stable gene ids in `ids`
    ///
    /// The service ignores an empty filter and would return every row, so no
    /// ids means no query.
    async fn query_linked(&self, dataset: &Dataset, attributes: Vec<String>, ids: &[String]) -> Result<Table> {
        if ids.is_empty() {
            tracing::debug!(dataset = %dataset.name, "No ids to look up, skipping query");
            return Ok(Table::new(attributes));
        }

        let mut filters = Filters::new();
        filters.insert(LINK_FILTER.to_string(), ids.to_vec());
        self.service.query(dataset, &attributes, &filters).await
    }
}

/// Merge the three lookup tables of one batch
///
/// `targets` is outer-merged with `homologs` on target id to homolog id, the
/// result with `source_ids` on the source id, and the homolog column is
/// dropped.
pub fn assemble(
    config: &MapperConfig,
    targets: &Table,
    homologs: &Table,
    source_ids: &Table,
) -> Result<Table> {
    let mut merged = targets
        .outer_merge(homologs, &config.target_id_name, &config.homolog_attribute)?
        .outer_merge(source_ids, &config.source_id_name, &config.source_id_name)?;
    merged.drop_column(&config.homolog_attribute)?;
    Ok(merged)
}
