//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores nodes based on the idea that connections to
//! high-scoring nodes contribute more to a node's score. It's the dominant
//! eigenvector of the adjacency matrix.
//!
//! # Algorithm
//!
//! Power iteration on `A + I` (adjacency plus identity):
//!
//! 1. Initialize scores uniformly.
//! 2. For each node `v`: `score(v) = last(v) + sum of last(u) for u — v`.
//! 3. Normalize the score vector to unit L2 norm.
//! 4. Stop once the L1 change drops below `n * tolerance`; fail after
//!    `max_iter` iterations.
//!
//! Adding the identity shifts every eigenvalue by one without changing the
//! eigenvectors. On bipartite graphs plain `A` has `-λ` as well as `λ` in
//! its spectrum and the iteration oscillates; `A + I` does not.
//!
//! Edge weights are ignored.
//!
//! # Output
//!
//! An [`EigenvectorResult`] holding a [`ScoreMap`] with unit L2 norm and the
//! number of iterations used.

use tracing::{debug, instrument};

use super::{Metric, ScoreMap};
use crate::error::{Error, Result};
use crate::graph::EdgeGraph;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores.
    pub scores: ScoreMap,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// Compute eigenvector centrality for all nodes in the graph.
///
/// # Arguments
///
/// * `eg` — The undirected edge graph.
/// * `max_iter` — Maximum number of iterations.
/// * `tolerance` — Per-node convergence threshold.
///
/// # Errors
///
/// Returns [`Error::DegenerateGraph`] for an empty graph and
/// [`Error::Convergence`] if the scores have not settled after
/// `max_iter` iterations.
#[instrument(skip(eg))]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(
    eg: &EdgeGraph,
    max_iter: usize,
    tolerance: f64,
) -> Result<EigenvectorResult> {
    let g = &eg.graph;
    let n = g.node_count();

    if n == 0 {
        return Err(Error::DegenerateGraph { nodes: 0 });
    }

    let neighbors: Vec<Vec<usize>> = g
        .node_indices()
        .map(|v| g.neighbors(v).map(|u| u.index()).collect())
        .collect();

    let threshold = n as f64 * tolerance;
    let mut scores = vec![1.0 / n as f64; n];

    for iter in 0..max_iter {
        let last = scores.clone();

        for (v, nbrs) in neighbors.iter().enumerate() {
            for &u in nbrs {
                scores[v] += last[u];
            }
        }

        let norm: f64 = scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut scores {
                *x /= norm;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(&last)
            .map(|(a, b)| (a - b).abs())
            .sum();

        if diff < threshold {
            let iterations = iter + 1;
            debug!(iterations, diff, "power iteration converged");
            return Ok(EigenvectorResult {
                scores: ScoreMap::from_node_values(Metric::Eigenvector, eg, scores),
                iterations,
            });
        }
    }

    Err(Error::Convergence {
        iterations: max_iter,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
