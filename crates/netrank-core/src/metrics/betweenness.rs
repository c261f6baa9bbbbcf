//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness nodes are "bridges" —
//! removing them would lengthen or cut paths between other parts of the
//! graph.
//!
//! # Algorithm
//!
//! We implement Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E). Pairs in different components have no shortest
//! path and contribute nothing.
//!
//! # Scaling
//!
//! Running from every source counts each unordered pair `{s, t}` twice.
//!
//! - `normalized = true`: divide by `(n-1)(n-2)`, the number of ordered
//!   pairs excluding the node itself, so scores fall in `[0, 1]`. Graphs
//!   with two or fewer nodes are left unscaled (every score is 0 anyway).
//! - `normalized = false`: halve, so each unordered pair counts once.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use tracing::instrument;

use super::{Metric, ScoreMap};
use crate::graph::EdgeGraph;

/// Compute betweenness centrality for all nodes in the graph.
///
/// # Returns
///
/// A [`ScoreMap`] over every node. Nodes with no shortest paths through
/// them (leaves, isolated nodes) receive a score of 0.0.
#[must_use]
#[instrument(skip(eg))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(eg: &EdgeGraph, normalized: bool) -> ScoreMap {
    let g = &eg.graph;
    let n = g.node_count();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in g.node_indices() {
        let si = s.index();

        // Stack: nodes in order of discovery (farthest popped first).
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);

        // predecessors[w]: nodes immediately preceding w on shortest paths from s.
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[si] = 0;

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = v.index();
            stack.push(v);

            for w in g.neighbors(v) {
                let wi = w.index();

                // First visit to w?
                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = w.index();

            for &v in &predecessors[wi] {
                let vi = v.index();
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    let scale = if normalized {
        (n > 2).then(|| 1.0 / ((n - 1) * (n - 2)) as f64)
    } else {
        Some(0.5)
    };
    if let Some(scale) = scale {
        for score in &mut cb {
            *score *= scale;
        }
    }

    ScoreMap::from_node_values(Metric::Betweenness, eg, cb)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load;

    fn make_graph(edges: &[(&str, &str)]) -> EdgeGraph {
        let rows = std::iter::once(vec!["s", "t", "w"])
            .chain(edges.iter().map(|(a, b)| vec![*a, *b, "1"]));
        load(rows).expect("load")
    }

    #[test]
    fn empty_graph_returns_empty() {
        let bc = betweenness_centrality(&EdgeGraph::default(), true);
        assert!(bc.is_empty());
    }

    #[test]
    fn pair_has_zero_betweenness() {
        let bc = betweenness_centrality(&make_graph(&[("A", "B")]), true);
        assert_eq!(bc.get("A"), Some(0.0));
        assert_eq!(bc.get("B"), Some(0.0));
    }

    #[test]
    fn linear_chain_middle_node_has_betweenness() {
        // A—B—C: B is on the only shortest path between A and C.
        let g = make_graph(&[("A", "B"), ("B", "C")]);

        let raw = betweenness_centrality(&g, false);
        assert!((raw["A"] - 0.0).abs() < 1e-10, "A is a leaf");
        assert!((raw["B"] - 1.0).abs() < 1e-10, "B on path A—C: {}", raw["B"]);
        assert!((raw["C"] - 0.0).abs() < 1e-10, "C is a leaf");

        let norm = betweenness_centrality(&g, true);
        assert!((norm["B"] - 1.0).abs() < 1e-10, "normalized B: {}", norm["B"]);
    }

    #[test]
    fn star_center_carries_every_pair() {
        // 1 is the hub; the 6 leaf pairs all route through it.
        let g = make_graph(&[("1", "2"), ("1", "3"), ("1", "4"), ("1", "5")]);

        let raw = betweenness_centrality(&g, false);
        assert!((raw["1"] - 6.0).abs() < 1e-10, "hub raw: {}", raw["1"]);

        let norm = betweenness_centrality(&g, true);
        assert!((norm["1"] - 1.0).abs() < 1e-10, "hub normalized: {}", norm["1"]);
        for leaf in ["2", "3", "4", "5"] {
            assert!(norm[leaf].abs() < 1e-10, "{leaf} betweenness should be 0");
        }
    }

    #[test]
    fn square_splits_paths_evenly() {
        // A—B—D and A—C—D plus the ring closing edges: a 4-cycle.
        // Each opposite pair has two shortest paths, one via each neighbor.
        let g = make_graph(&[("A", "B"), ("B", "D"), ("D", "C"), ("C", "A")]);
        let raw = betweenness_centrality(&g, false);
        for id in ["A", "B", "C", "D"] {
            assert!((raw[id] - 0.5).abs() < 1e-10, "{id}: {}", raw[id]);
        }
    }

    #[test]
    fn chain_of_four_betweenness() {
        // A—B—C—D
        // B is on paths A–C, A–D  → 2.0
        // C is on paths A–D, B–D  → 2.0
        let g = make_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let bc = betweenness_centrality(&g, false);

        assert!((bc["A"] - 0.0).abs() < 1e-10, "A betweenness = 0");
        assert!((bc["B"] - 2.0).abs() < 1e-10, "B betweenness = 2.0, got {}", bc["B"]);
        assert!((bc["C"] - 2.0).abs() < 1e-10, "C betweenness = 2.0, got {}", bc["C"]);
        assert!((bc["D"] - 0.0).abs() < 1e-10, "D betweenness = 0");

        // (n-1)(n-2) = 6 ordered pairs, each unordered pair counted twice.
        let norm = betweenness_centrality(&g, true);
        assert!((norm["B"] - 4.0 / 6.0).abs() < 1e-10, "got {}", norm["B"]);
    }

    #[test]
    fn disconnected_components_no_cross_betweenness() {
        // A—B and C—D: no node lies between any connected pair.
        let bc = betweenness_centrality(&make_graph(&[("A", "B"), ("C", "D")]), true);

        for id in ["A", "B", "C", "D"] {
            assert!(
                (bc[id] - 0.0).abs() < 1e-10,
                "{id} betweenness = 0 in disconnected pairs"
            );
        }
    }
}
