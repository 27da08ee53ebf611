#![forbid(unsafe_code)]
//! ecosa-core library.
//!
//! Agreement records and everything that happens to them before a graph is
//! built: ingestion from loosely typed rows, multi-select filtering, detail
//! lookup by party, and configuration.
//!
//! # Conventions
//!
//! - **Errors**: Use [`Result`] / [`Error`] for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod kind;
pub mod party;
pub mod record;

pub use error::{Error, ErrorCode, Result};
pub use filter::FilterSelection;
pub use ingest::{IngestPolicy, IngestReport, RawRecord};
pub use kind::{LayoutKind, MetricKind};
pub use record::{AgreementRecord, Membership};
