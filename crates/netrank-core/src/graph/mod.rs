//! Undirected edge graph for centrality computation.
//!
//! # Overview
//!
//! This module turns tabular edge rows into a petgraph-based undirected
//! graph. The graph feeds every centrality metric in [`crate::metrics`].
//!
//! ## Pipeline
//!
//! ```text
//! CSV file / in-memory rows
//!        ↓  load::load() / EdgeGraph::from_path()
//! EdgeGraph (UnGraph<String, i64>, nodes in first-seen order)
//!        ↓  metrics::compute_all()
//! ```
//!
//! ## Node Order
//!
//! Node indices follow the order in which identities first appear in the
//! input. Every [`crate::metrics::ScoreMap`] iterates in this order and the
//! ranker uses it to break ties, so output is reproducible for a given
//! input file.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use netrank_core::graph::EdgeGraph;
//!
//! let graph = EdgeGraph::from_path("stormofswords.csv")?;
//! println!("nodes={} edges={}", graph.node_count(), graph.edge_count());
//! ```

pub mod load;

pub use load::{EdgeGraph, load};
