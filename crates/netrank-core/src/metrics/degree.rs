//! Degree centrality.
//!
//! The fraction of the other nodes a node is directly connected to:
//! `neighbors(v) / (n - 1)`. A self-loop counts the node as its own
//! neighbor once.

use tracing::instrument;

use super::{Metric, ScoreMap};
use crate::error::{Error, Result};
use crate::graph::EdgeGraph;

/// Compute degree centrality for every node.
///
/// # Errors
///
/// Returns [`Error::DegenerateGraph`] if the graph has fewer than two
/// nodes, where the `n - 1` denominator is meaningless.
#[instrument(skip(eg))]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(eg: &EdgeGraph) -> Result<ScoreMap> {
    let n = eg.node_count();
    if n < 2 {
        return Err(Error::DegenerateGraph { nodes: n });
    }

    let denom = (n - 1) as f64;
    let values = eg
        .graph
        .node_indices()
        .map(|v| eg.graph.neighbors(v).count() as f64 / denom)
        .collect();

    Ok(ScoreMap::from_node_values(Metric::Degree, eg, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load;

    fn graph(edges: &[(&str, &str)]) -> EdgeGraph {
        let rows = std::iter::once(vec!["s", "t", "w"])
            .chain(edges.iter().map(|(a, b)| vec![*a, *b, "1"]));
        load(rows).expect("load")
    }

    #[test]
    fn empty_graph_is_degenerate() {
        let err = degree_centrality(&EdgeGraph::default()).expect_err("empty");
        assert!(matches!(err, Error::DegenerateGraph { nodes: 0 }));
    }

    #[test]
    fn single_pair_is_fully_connected() {
        let dc = degree_centrality(&graph(&[("A", "B")])).expect("degree");
        assert!((dc["A"] - 1.0).abs() < 1e-12);
        assert!((dc["B"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn star_center_and_leaves() {
        let g = graph(&[("1", "2"), ("1", "3"), ("1", "4"), ("1", "5")]);
        let dc = degree_centrality(&g).expect("degree");

        assert!((dc["1"] - 1.0).abs() < 1e-12, "center: {}", dc["1"]);
        for leaf in ["2", "3", "4", "5"] {
            assert!((dc[leaf] - 0.25).abs() < 1e-12, "{leaf}: {}", dc[leaf]);
        }
    }

    #[test]
    fn duplicate_rows_do_not_inflate_degree() {
        let g = graph(&[("A", "B"), ("B", "A"), ("A", "B"), ("B", "C")]);
        let dc = degree_centrality(&g).expect("degree");
        assert!((dc["A"] - 0.5).abs() < 1e-12);
        assert!((dc["B"] - 1.0).abs() < 1e-12);
    }
}
