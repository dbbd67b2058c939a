//! End-to-end tests for the orthomap binary
//!
//! These tests run the compiled binary against a mocked martservice and
//! check:
//! - map output in tsv, csv and json
//! - identifier files and presets
//! - marts and datasets listings
//! - failure exit codes

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, Request, ResponseTemplate,
};

const MARTSERVICE: &str = "/biomart/martservice";

const REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MartRegistry>
  <MartURLLocation database="ensembl_mart_111" displayName="Ensembl Genes 111" name="ENSEMBL_MART_ENSEMBL" serverVirtualSchema="default" visible="1" />
</MartRegistry>
"#;

const DATASETS: &str = "\n\
TableSet\thsapiens_gene_ensembl\tHuman genes (GRCh38.p14)\t1\tGRCh38.p14\n\
TableSet\tmmusculus_gene_ensembl\tMouse genes (GRCm39)\t1\tGRCm39\n";

fn query_contains(needle: &'static str) -> impl Fn(&Request) -> bool + Send + Sync {
    move |req: &Request| {
        req.url
            .query_pairs()
            .any(|(key, value)| key == "query" && value.contains(needle))
    }
}

async fn respond_to_query(mock_server: &MockServer, needle: &'static str, body: &'static str) {
    Mock::given(method("GET"))
        .and(path(MARTSERVICE))
        .and(query_contains(needle))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(mock_server)
        .await;
}

/// Directory plus the three human to mouse lookups for TP53 and TERT
async fn human_mouse_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MARTSERVICE))
        .and(query_param("type", "registry"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REGISTRY))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(MARTSERVICE))
        .and(query_param("type", "datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DATASETS))
        .mount(&mock_server)
        .await;

    respond_to_query(
        &mock_server,
        r#"<Attribute name="hgnc_symbol"/>"#,
        "HGNC symbol\tGene stable ID\nTP53\tENSG001\nTERT\tENSG002\n[success]\n",
    )
    .await;
    respond_to_query(
        &mock_server,
        r#"<Attribute name="mmusculus_homolog_ensembl_gene"/>"#,
        "Gene stable ID\tMouse gene stable ID\nENSG001\tENSMUSG001\nENSG002\t\n[success]\n",
    )
    .await;
    respond_to_query(
        &mock_server,
        r#"<Dataset name="mmusculus_gene_ensembl""#,
        "Gene name\tGene stable ID\nTrp53\tENSMUSG001\n[success]\n",
    )
    .await;

    mock_server
}

fn orthomap(mock_server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("orthomap").unwrap();
    cmd.env_remove("ORTHOMAP_CHUNK_SIZE")
        .env_remove("ORTHOMAP_PATH")
        .env("LOG_LEVEL", "error")
        .arg("--host")
        .arg(mock_server.uri());
    cmd
}

// ============================================================================
// map
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_map_tsv_output() {
    let mock_server = human_mouse_server().await;

    orthomap(&mock_server)
        .args(["map", "TP53", "TERT", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "external_gene_name\tmouse_ensembl_gene_id\thuman_ensembl_gene_id\thgnc_symbol\n",
        ))
        .stdout(predicate::str::contains("Trp53\tENSMUSG001\tENSG001\tTP53\n"))
        .stdout(predicate::str::contains("\t\tENSG002\tTERT\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_map_json_output_uses_null() {
    let mock_server = human_mouse_server().await;

    let output = orthomap(&mock_server)
        .args(["map", "TP53", "TERT", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["external_gene_name"], "Trp53");
    assert_eq!(rows[1]["hgnc_symbol"], "TERT");
    assert!(rows[1]["mouse_ensembl_gene_id"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_map_csv_without_header_to_file() {
    let mock_server = human_mouse_server().await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("orthologs.csv");

    orthomap(&mock_server)
        .args(["map", "TP53", "TERT", "--format", "csv", "--no-header", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 rows written"));

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, "Trp53,ENSMUSG001,ENSG001,TP53\n,,ENSG002,TERT\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_map_reads_identifier_file() {
    let mock_server = human_mouse_server().await;
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("genes.txt");
    std::fs::write(&input, "# tumour suppressors\nTP53\n\nTERT\n").unwrap();

    orthomap(&mock_server)
        .args(["map", "--format", "tsv", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("TP53"))
        .stdout(predicate::str::contains("TERT"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_map_comment_only_identifier_file_maps_nothing() {
    let mock_server = human_mouse_server().await;
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("genes.txt");
    std::fs::write(&input, "# nothing here\n\n").unwrap();

    orthomap(&mock_server)
        .args(["map", "--format", "tsv", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("TP53").not())
        .stderr(predicate::str::contains("0 rows"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_map_query_error_exits_with_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MARTSERVICE))
        .and(query_param("type", "registry"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REGISTRY))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(MARTSERVICE))
        .and(query_param("type", "datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DATASETS))
        .mount(&mock_server)
        .await;
    respond_to_query(
        &mock_server,
        "<Query",
        "Query ERROR: caught BioMart::Exception::Usage: Filter hgnc_symbol NOT FOUND\n",
    )
    .await;

    orthomap(&mock_server)
        .args(["map", "TP53", "--format", "tsv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("NOT FOUND"));
}

#[test]
fn test_map_rejects_zero_chunk_size() {
    let mut cmd = Command::cargo_bin("orthomap").unwrap();
    cmd.env("LOG_LEVEL", "error")
        .args(["--host", "http://127.0.0.1:9", "map", "TP53", "--chunk-size", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("chunk_size must be positive"));
}

#[test]
fn test_map_missing_config_file() {
    let mut cmd = Command::cargo_bin("orthomap").unwrap();
    cmd.env("LOG_LEVEL", "error")
        .args(["map", "--config", "/nonexistent/orthomap.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// marts / datasets
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_marts_listing() {
    let mock_server = human_mouse_server().await;

    orthomap(&mock_server)
        .args(["marts", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ENSEMBL_MART_ENSEMBL\tEnsembl Genes 111\tensembl_mart_111",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_datasets_listing() {
    let mock_server = human_mouse_server().await;

    orthomap(&mock_server)
        .args(["datasets", "--format", "csv", "--no-header"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mmusculus_gene_ensembl,Mouse genes (GRCm39)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_datasets_unknown_mart() {
    let mock_server = human_mouse_server().await;

    orthomap(&mock_server)
        .args(["datasets", "--mart", "ENSEMBL_MART_SNP"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ENSEMBL_MART_SNP"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logging_setup_failure_is_reported_and_command_runs() {
    let mock_server = human_mouse_server().await;

    orthomap(&mock_server)
        .env_remove("RUST_LOG")
        .env("LOG_FILTER", "orthomap=chatty")
        .args(["marts", "--format", "tsv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("logging disabled"))
        .stderr(predicate::str::contains("orthomap=chatty"))
        .stdout(predicate::str::contains("ENSEMBL_MART_ENSEMBL"));
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("orthomap").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("map"))
        .stdout(predicate::str::contains("marts"))
        .stdout(predicate::str::contains("datasets"));
}
