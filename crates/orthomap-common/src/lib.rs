//! orthomap common library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared setup used by every orthomap binary.
//!
//! # Overview
//!
//! - **Logging**: tracing subscriber configuration (console, rotating files,
//!   text or JSON) driven by a [`logging::LogConfig`] or the environment.
//!
//! # Example
//!
//! ```no_run
//! use orthomap_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LoggingGuard};
