//! Query documents and TSV result decoding
//!
//! A BioMart query is an XML document naming one dataset, its filters and
//! the attributes to return:
//!
//! ```xml
//! <Query virtualSchemaName="default" formatter="TSV" header="1" uniqueRows="1"
//!        datasetConfigVersion="0.6" completionStamp="1">
//!   <Dataset name="hsapiens_gene_ensembl" interface="default">
//!     <Filter name="link_ensembl_gene_id" value="ENSG00000141510,ENSG00000164362"/>
//!     <Attribute name="ensembl_gene_id"/>
//!     <Attribute name="mmusculus_homolog_ensembl_gene"/>
//!   </Dataset>
//! </Query>
//! ```
//!
//! The response is tab-separated with a header line, followed by a
//! `[success]` completion stamp when the server streamed every row.

use super::{Dataset, Filters};
use crate::error::{OrthoError, Result};
use crate::table::{Cell, Table};
use serde::Serialize;

/// Marker the service writes at the end of a complete result
pub const COMPLETION_STAMP: &str = "[success]";

/// Prefix of in-band error messages
const QUERY_ERROR_MARKER: &str = "Query ERROR";

#[derive(Debug, Serialize)]
struct Query {
    #[serde(rename = "@virtualSchemaName")]
    virtual_schema_name: String,
    #[serde(rename = "@formatter")]
    formatter: &'static str,
    #[serde(rename = "@header")]
    header: &'static str,
    #[serde(rename = "@uniqueRows")]
    unique_rows: &'static str,
    #[serde(rename = "@datasetConfigVersion")]
    dataset_config_version: &'static str,
    #[serde(rename = "@completionStamp")]
    completion_stamp: &'static str,
    #[serde(rename = "Dataset")]
    dataset: QueryDataset,
}

#[derive(Debug, Serialize)]
struct QueryDataset {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@interface")]
    interface: &'static str,
    #[serde(rename = "Filter")]
    filters: Vec<QueryFilter>,
    #[serde(rename = "Attribute")]
    attributes: Vec<QueryAttribute>,
}

#[derive(Debug, Serialize)]
struct QueryFilter {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@value")]
    value: String,
}

#[derive(Debug, Serialize)]
struct QueryAttribute {
    #[serde(rename = "@name")]
    name: String,
}

/// Serialize a query for `dataset`
///
/// Filter values are comma-joined; filters appear in name order, then the
/// attributes in request order.
pub fn build_query_xml(dataset: &Dataset, attributes: &[String], filters: &Filters) -> Result<String> {
    if attributes.is_empty() {
        return Err(OrthoError::config("a BioMart query needs at least one attribute"));
    }

    let query = Query {
        virtual_schema_name: dataset.virtual_schema.clone(),
        formatter: "TSV",
        header: "1",
        unique_rows: "1",
        dataset_config_version: "0.6",
        completion_stamp: "1",
        dataset: QueryDataset {
            name: dataset.name.clone(),
            interface: "default",
            filters: filters
                .iter()
                .map(|(name, values)| QueryFilter {
                    name: name.clone(),
                    value: values.join(","),
                })
                .collect(),
            attributes: attributes
                .iter()
                .map(|name| QueryAttribute { name: name.clone() })
                .collect(),
        },
    };

    quick_xml::se::to_string(&query).map_err(OrthoError::xml)
}

/// Decode a TSV response into a table named by `attributes`
///
/// The server's header carries display names; columns are renamed to the
/// requested attribute names. Empty cells become missing values.
pub fn parse_response(body: &str, attributes: &[String]) -> Result<Table> {
    if let Some(pos) = body.find(QUERY_ERROR_MARKER) {
        return Err(OrthoError::query(body[pos..].trim()));
    }

    let payload = strip_completion_stamp(body)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(false)
        .quoting(false)
        .from_reader(payload.as_bytes());

    let header_width = reader.headers()?.len();
    if header_width != attributes.len() {
        return Err(OrthoError::malformed(format!(
            "expected {} columns, response header has {}",
            attributes.len(),
            header_width
        )));
    }

    let mut table = Table::new(attributes.iter().cloned());
    for record in reader.records() {
        let record = record?;
        let row: Vec<Cell> = record
            .iter()
            .map(|value| (!value.is_empty()).then(|| value.to_string()))
            .collect();
        table.push_row(row)?;
    }

    Ok(table)
}

/// Remove the trailing completion stamp, failing when it is absent
fn strip_completion_stamp(body: &str) -> Result<&str> {
    let trimmed = body.trim_end();
    let payload = trimmed
        .strip_suffix(COMPLETION_STAMP)
        .ok_or_else(|| OrthoError::malformed("missing completion stamp, result is truncated"))?;

    if payload.trim().is_empty() {
        return Err(OrthoError::malformed("response has no header line"));
    }

    Ok(payload)
}
