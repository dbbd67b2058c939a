//! In-memory BioMart stand-in shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use orthomap::biomart::{Dataset, Filters, MartService, GENE_ID_ATTRIBUTE, LINK_FILTER};
use orthomap::table::Table;
use orthomap::{OrthoError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const MART: &str = "ENSEMBL_MART_ENSEMBL";

/// One recorded `query` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub dataset: String,
    pub attributes: Vec<String>,
    pub filters: Filters,
}

/// Serves each dataset from one full table
///
/// Queries select the requested attributes and drop duplicate rows. The
/// link filter matches `ensembl_gene_id`, any other filter the column of
/// the same name.
#[derive(Default)]
pub struct MockMart {
    tables: HashMap<String, Table>,
    calls: Mutex<Vec<RecordedQuery>>,
    fail_on_call: Option<usize>,
}

impl MockMart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, name: &str, table: Table) -> Self {
        self.tables.insert(name.to_string(), table);
        self
    }

    /// Make the `n`th query (0-based) fail with a query error
    pub fn failing_on_call(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MartService for MockMart {
    async fn dataset(&self, mart: &str, name: &str) -> Result<Dataset> {
        if mart != MART {
            return Err(OrthoError::MartNotFound(mart.to_string()));
        }
        if !self.tables.contains_key(name) {
            return Err(OrthoError::dataset_not_found(mart, name));
        }
        Ok(Dataset {
            name: name.to_string(),
            display_name: name.to_string(),
            mart: mart.to_string(),
            virtual_schema: "default".to_string(),
        })
    }

    async fn query(&self, dataset: &Dataset, attributes: &[String], filters: &Filters) -> Result<Table> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedQuery {
                dataset: dataset.name.clone(),
                attributes: attributes.to_vec(),
                filters: filters.clone(),
            });
            calls.len() - 1
        };

        if self.fail_on_call == Some(call) {
            return Err(OrthoError::query("Query ERROR: injected failure"));
        }

        let mut table = self
            .tables
            .get(&dataset.name)
            .cloned()
            .ok_or_else(|| OrthoError::dataset_not_found(&dataset.mart, &dataset.name))?;

        for (name, values) in filters {
            let column = if name == LINK_FILTER { GENE_ID_ATTRIBUTE } else { name.as_str() };
            let wanted: HashSet<&str> = values.iter().map(String::as_str).collect();
            table
                .retain_rows_in(column, &wanted)
                .map_err(|_| OrthoError::query(format!("Query ERROR: filter {} NOT FOUND", name)))?;
        }

        let mut selected = table
            .select(attributes)
            .map_err(|e| OrthoError::query(format!("Query ERROR: {}", e)))?;
        selected.dedup_rows();
        Ok(selected)
    }
}

pub fn cell(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Build a table from string rows; empty strings are missing values
pub fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_rows(
        columns.iter().copied(),
        rows.iter().map(|row| row.iter().map(|v| cell(v)).collect()).collect(),
    )
    .unwrap()
}

/// Human and mouse tables covering TP53 (with a mouse ortholog) and TERT
/// (without one)
pub fn human_mouse_mart() -> MockMart {
    let human = table(
        &["hgnc_symbol", "ensembl_gene_id", "mmusculus_homolog_ensembl_gene", "external_gene_name"],
        &[
            &["TP53", "ENSG001", "ENSMUSG001", "TP53"],
            &["TERT", "ENSG002", "", "TERT"],
            &["EPCAM", "ENSG003", "ENSMUSG003", "EPCAM"],
        ],
    );
    let mouse = table(
        &["external_gene_name", "ensembl_gene_id", "hsapiens_homolog_ensembl_gene"],
        &[
            &["Trp53", "ENSMUSG001", "ENSG001"],
            &["Epcam", "ENSMUSG003", "ENSG003"],
        ],
    );

    MockMart::new()
        .with_dataset("hsapiens_gene_ensembl", human)
        .with_dataset("mmusculus_gene_ensembl", mouse)
}
