#![forbid(unsafe_code)]
//! netrank-core library.
//!
//! Loads an undirected edge list, scores every node with four centrality
//! metrics, ranks each metric and zips the rankings into one report.
//!
//! ```text
//! CSV rows ──► graph::EdgeGraph ──► metrics::compute_all ──► rank::rank_all ──► report::build_report
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Pipeline stages return [`Result`] with the typed [`Error`].
//!   Config loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod rank;
pub mod report;

pub use config::NetrankConfig;
pub use error::{Error, ErrorCode, Result};
pub use graph::EdgeGraph;
pub use metrics::{CentralityScores, Metric, ScoreMap, compute_all};
pub use rank::{RankedList, RankedLists, rank, rank_all};
pub use report::{Report, ReportRow, TableStyle, build_report};
