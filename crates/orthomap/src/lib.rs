//! orthomap
//!
//! Maps gene identifiers of one species to orthologous genes of another
//! through the Ensembl BioMart `martservice` interface.
//!
//! Identifier lists are split into batches; each batch is resolved with
//! three remote lookups (identifier to gene id, gene id to homolog, homolog
//! to target attributes) whose results are outer-merged, so genes without
//! an ortholog are kept with missing values.
//!
//! # Example
//!
//! ```no_run
//! use orthomap::mapper::{human_to_mouse, OrthologMapper};
//!
//! #[tokio::main]
//! async fn main() -> orthomap::Result<()> {
//!     let mapper = OrthologMapper::from_config(human_to_mouse()).await?;
//!     let ids = vec!["TP53".to_string(), "BRCA1".to_string()];
//!     let table = mapper.map(Some(ids.as_slice())).await?;
//!     println!("{} rows", table.len());
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod batch;
pub mod biomart;
pub mod cli;
pub mod commands;
pub mod error;
pub mod mapper;
pub mod output;
pub mod progress;
pub mod table;

pub use error::{OrthoError, Result};
pub use mapper::{MapperConfig, OrthologMapper};
pub use table::Table;
