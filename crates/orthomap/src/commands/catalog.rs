//! `orthomap marts` and `orthomap datasets` command implementations

use super::server_config;
use crate::biomart::{client::DEFAULT_HOST, BiomartClient, Dataset, Mart};
use crate::cli::{Cli, OutputArgs};
use crate::error::Result;
use crate::output;
use crate::table::Table;
use tracing::info;

/// List the marts of the host
pub async fn marts(cli: &Cli, output_args: &OutputArgs) -> Result<()> {
    let client = BiomartClient::connect(&server_config(cli, DEFAULT_HOST)).await?;
    let table = marts_table(client.marts())?;
    info!(marts = table.len(), "Listed marts");
    write(&table, output_args)
}

/// List the datasets of `mart`
pub async fn datasets(cli: &Cli, mart: &str, output_args: &OutputArgs) -> Result<()> {
    let client = BiomartClient::connect(&server_config(cli, DEFAULT_HOST)).await?;
    let table = datasets_table(&client.list_datasets(mart).await?)?;
    info!(mart, datasets = table.len(), "Listed datasets");
    write(&table, output_args)
}

fn write(table: &Table, output_args: &OutputArgs) -> Result<()> {
    output::write(
        table,
        output_args.format(),
        output_args.no_header,
        output_args.output.as_deref(),
    )
}

pub fn marts_table(marts: &[Mart]) -> Result<Table> {
    let rows = marts
        .iter()
        .map(|m| {
            vec![
                Some(m.name.clone()),
                Some(m.display_name.clone()).filter(|s| !s.is_empty()),
                Some(m.database.clone()).filter(|s| !s.is_empty()),
            ]
        })
        .collect();
    Table::from_rows(["name", "display_name", "database"], rows)
}

pub fn datasets_table(datasets: &[Dataset]) -> Result<Table> {
    let rows = datasets
        .iter()
        .map(|d| {
            vec![
                Some(d.name.clone()),
                Some(d.display_name.clone()).filter(|s| !s.is_empty()),
            ]
        })
        .collect();
    Table::from_rows(["name", "display_name"], rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_marts_table() {
        let marts = vec![Mart {
            name: "ENSEMBL_MART_ENSEMBL".to_string(),
            display_name: "Ensembl Genes 111".to_string(),
            database: String::new(),
            virtual_schema: "default".to_string(),
        }];
        let table = marts_table(&marts).unwrap();
        assert_eq!(table.get(0, "name"), Some("ENSEMBL_MART_ENSEMBL"));
        assert_eq!(table.get(0, "database"), None);
    }

    #[test]
    fn test_datasets_table() {
        let datasets = vec![Dataset {
            name: "mmusculus_gene_ensembl".to_string(),
            display_name: "Mouse genes (GRCm39)".to_string(),
            mart: "ENSEMBL_MART_ENSEMBL".to_string(),
            virtual_schema: "default".to_string(),
        }];
        let table = datasets_table(&datasets).unwrap();
        assert_eq!(table.columns(), ["name", "display_name"]);
        assert_eq!(table.get(0, "display_name"), Some("Mouse genes (GRCm39)"));
    }
}
