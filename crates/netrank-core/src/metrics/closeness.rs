//! Closeness centrality.
//!
//! For a node `v` that reaches `r - 1` other nodes with total hop distance
//! `d`, closeness is `(r - 1) / d`: the reciprocal of the mean distance to
//! the nodes it can reach.
//!
//! With `wf_improved` (Wasserman and Faust) the score is further scaled by
//! `(r - 1) / (n - 1)`, the fraction of the graph that is reachable, so
//! that nodes in small components do not look central. Isolated nodes
//! score 0.
//!
//! Distances count edges; weights are ignored.

use std::collections::VecDeque;

use tracing::instrument;

use super::{Metric, ScoreMap};
use crate::graph::EdgeGraph;

/// Compute closeness centrality for every node.
#[must_use]
#[instrument(skip(eg))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(eg: &EdgeGraph, wf_improved: bool) -> ScoreMap {
    let g = &eg.graph;
    let n = g.node_count();

    let mut values = vec![0.0; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::with_capacity(n);

    for s in g.node_indices() {
        dist.fill(None);
        dist[s.index()] = Some(0);
        queue.clear();
        queue.push_back(s);

        let mut total = 0usize;
        let mut reached = 0usize;

        while let Some(v) = queue.pop_front() {
            let dv = dist[v.index()].unwrap_or_default();
            total += dv;
            reached += 1;

            for w in g.neighbors(v) {
                if dist[w.index()].is_none() {
                    dist[w.index()] = Some(dv + 1);
                    queue.push_back(w);
                }
            }
        }

        // `reached` includes the source itself.
        let others = reached - 1;
        if total > 0 && n > 1 {
            let mut c = others as f64 / total as f64;
            if wf_improved {
                c *= others as f64 / (n - 1) as f64;
            }
            values[s.index()] = c;
        }
    }

    ScoreMap::from_node_values(Metric::Closeness, eg, values)
}
