//! Centrality metrics for the edge graph.
//!
//! # Overview
//!
//! Four independent metrics, each answering a different question about
//! node importance:
//!
//! - **Degree centrality** (`degree`): How many direct neighbors does a
//!   node have, relative to the most it could have?
//! - **Eigenvector centrality** (`eigenvector`): Is the node connected to
//!   other well-connected nodes?
//! - **Closeness centrality** (`closeness`): How few hops separate the node
//!   from everything it can reach?
//! - **Betweenness centrality** (`betweenness`): How often does the node lie
//!   on shortest paths between other pairs?
//!
//! All metrics treat edges as unweighted and undirected. None mutates the
//! graph, so they can run in any order.
//!
//! # Usage
//!
//! ```rust,ignore
//! use netrank_core::{EdgeGraph, NetrankConfig, compute_all};
//!
//! let graph = EdgeGraph::from_path("stormofswords.csv")?;
//! let scores = compute_all(&graph, &NetrankConfig::default())?;
//! println!("{:?}", scores.degree.get("Tyrion"));
//! ```

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::NetrankConfig;
use crate::error::Result;
use crate::graph::EdgeGraph;

pub use betweenness::betweenness_centrality;
pub use closeness::closeness_centrality;
pub use degree::degree_centrality;
pub use eigenvector::{EigenvectorResult, eigenvector_centrality};

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// The four centrality metrics, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Degree,
    Eigenvector,
    Closeness,
    Betweenness,
}

impl Metric {
    /// All metrics in report column order.
    pub const ALL: [Self; 4] = [
        Self::Degree,
        Self::Eigenvector,
        Self::Closeness,
        Self::Betweenness,
    ];

    /// Column header used in the rendered report.
    ///
    /// `betweeness` is spelled the way existing consumers of this report
    /// expect it.
    #[must_use]
    pub const fn column_label(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Eigenvector => "eigenvector",
            Self::Closeness => "closeness",
            Self::Betweenness => "betweeness",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Eigenvector => "eigenvector",
            Self::Closeness => "closeness",
            Self::Betweenness => "betweenness",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ScoreMap
// ---------------------------------------------------------------------------

/// Node identity → score for a single metric.
///
/// Iterates in graph node order (first-seen order during loading).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMap {
    metric: Metric,
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl ScoreMap {
    /// Pair node-indexed `values` with the graph's node identities.
    ///
    /// `values[i]` must be the score of the node with index `i`.
    pub(crate) fn from_node_values(metric: Metric, graph: &EdgeGraph, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), graph.node_count());

        let entries: Vec<(String, f64)> = graph
            .nodes()
            .map(str::to_string)
            .zip(values)
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (id.clone(), i))
            .collect();

        Self {
            metric,
            entries,
            index,
        }
    }

    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Score for `node`, if it is in the graph.
    #[must_use]
    pub fn get(&self, node: &str) -> Option<f64> {
        self.index.get(node).map(|&i| self.entries[i].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(node, score)` pairs in graph node order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, score)| (id.as_str(), *score))
    }
}

impl Index<&str> for ScoreMap {
    type Output = f64;

    fn index(&self, node: &str) -> &f64 {
        match self.index.get(node) {
            Some(&i) => &self.entries[i].1,
            None => panic!("no {} score for node `{node}`", self.metric),
        }
    }
}

// ---------------------------------------------------------------------------
// compute_all
// ---------------------------------------------------------------------------

/// All four score maps computed from the same graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityScores {
    pub degree: ScoreMap,
    pub eigenvector: ScoreMap,
    pub closeness: ScoreMap,
    pub betweenness: ScoreMap,
}

impl CentralityScores {
    /// Score map for `metric`.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> &ScoreMap {
        match metric {
            Metric::Degree => &self.degree,
            Metric::Eigenvector => &self.eigenvector,
            Metric::Closeness => &self.closeness,
            Metric::Betweenness => &self.betweenness,
        }
    }
}

/// Compute degree, eigenvector, closeness and betweenness centrality.
///
/// # Errors
///
/// Returns [`crate::Error::DegenerateGraph`] for graphs with fewer than two
/// nodes and [`crate::Error::Convergence`] if eigenvector iteration does
/// not converge within `config.eigenvector.max_iter` iterations.
#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn compute_all(graph: &EdgeGraph, config: &NetrankConfig) -> Result<CentralityScores> {
    let degree = degree_centrality(graph)?;

    let eigen = eigenvector_centrality(
        graph,
        config.eigenvector.max_iter,
        config.eigenvector.tolerance,
    )?;
    info!(iterations = eigen.iterations, "eigenvector centrality converged");

    let closeness = closeness_centrality(graph, config.closeness.wf_improved);
    let betweenness = betweenness_centrality(graph, config.betweenness.normalized);

    Ok(CentralityScores {
        degree,
        eigenvector: eigen.scores,
        closeness,
        betweenness,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
