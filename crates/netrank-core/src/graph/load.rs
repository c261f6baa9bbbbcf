//! Graph construction from weighted edge rows.
//!
//! # Overview
//!
//! Each input row is `source, target, weight`. The first row is a header
//! and is always skipped, whatever it contains.
//!
//! ## Edges
//!
//! Edges are undirected. At most one edge joins any unordered pair of
//! nodes: a later row for the same pair overwrites the stored weight
//! (`B,A,9` after `A,B,5` leaves a single `A—B` edge of weight 9).
//! Self-loops are stored as given.
//!
//! ## Weights
//!
//! The weight field is parsed as a signed integer after trimming
//! surrounding whitespace. Weights are kept on the graph but the
//! centrality metrics treat every edge as unit length.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// EdgeGraph
// ---------------------------------------------------------------------------

/// An undirected, integer-weighted graph keyed by node identity.
///
/// Node indices are assigned in first-seen order and never change: the
/// graph is not mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct EdgeGraph {
    /// Undirected graph: nodes = identities, edges = integer weights.
    pub graph: UnGraph<String, i64>,
    /// Mapping from node identity to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl EdgeGraph {
    /// Build an [`EdgeGraph`] from CSV text.
    ///
    /// Records may have differing lengths; shape is validated per row by
    /// [`load`] rules, so a short row reports its row number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] if the CSV cannot be tokenized and
    /// [`Error::MalformedInput`] for rows with bad shape or weight.
    #[instrument(skip(reader))]
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut builder = Builder::default();

        for (i, record) in reader.records().enumerate() {
            let record = record?;
            if i == 0 {
                debug!(header = ?record, "skipping header row");
                continue;
            }
            // Blank lines are skipped by the reader, so the record index can
            // lag behind the file line.
            let row = record
                .position()
                .and_then(|p| usize::try_from(p.line()).ok())
                .unwrap_or(i + 1);
            let fields: Vec<&str> = record.iter().collect();
            builder.add_row(row, &fields)?;
        }

        Ok(builder.finish())
    }

    /// Build an [`EdgeGraph`] from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened, otherwise the
    /// same errors as [`EdgeGraph::from_csv_reader`].
    #[instrument]
    pub fn from_path<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Return the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of (deduplicated) edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a node identity.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return the identity label for a node.
    #[must_use]
    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Weight of the edge between `a` and `b`, in either direction.
    #[must_use]
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<i64> {
        let ia = self.node_index(a)?;
        let ib = self.node_index(b)?;
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Node identities in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }
}

/// Build an [`EdgeGraph`] from in-memory rows; the first row is a header.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if a data row has fewer than three
/// fields or its third field is not an integer.
pub fn load<I, R, S>(rows: I) -> Result<EdgeGraph>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = Builder::default();

    for (i, row) in rows.into_iter().enumerate().skip(1) {
        let fields: Vec<&str> = row.as_ref().iter().map(AsRef::as_ref).collect();
        builder.add_row(i + 1, &fields)?;
    }

    Ok(builder.finish())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Builder {
    graph: UnGraph<String, i64>,
    node_map: HashMap<String, NodeIndex>,
}

impl Builder {
    /// Add one data row. `row` is the 1-based position in the input,
    /// header included.
    fn add_row(&mut self, row: usize, fields: &[&str]) -> Result<()> {
        let [source, target, weight, ..] = fields else {
            return Err(Error::MalformedInput {
                row,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        };

        let weight = parse_weight(weight).ok_or_else(|| Error::MalformedInput {
            row,
            reason: format!("weight `{weight}` is not an integer"),
        })?;

        let a = self.intern(source);
        let b = self.intern(target);

        // Later rows for the same pair overwrite the weight.
        self.graph.update_edge(a, b, weight);
        Ok(())
    }

    fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    fn finish(self) -> EdgeGraph {
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "edge graph loaded"
        );
        EdgeGraph {
            graph: self.graph,
            node_map: self.node_map,
        }
    }
}

fn parse_weight(field: &str) -> Option<i64> {
    field.trim().parse::<i64>().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 3] = ["Source", "Target", "Weight"];

    fn rows<'a>(data: &[[&'a str; 3]]) -> Vec<Vec<&'a str>> {
        std::iter::once(HEADER.to_vec())
            .chain(data.iter().map(|r| r.to_vec()))
            .collect()
    }

    #[test]
    fn header_only_produces_empty_graph() {
        let graph = load(rows(&[])).expect("load");
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn empty_input_produces_empty_graph() {
        let graph = load(Vec::<Vec<&str>>::new()).expect("load");
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn header_is_skipped_even_if_it_looks_like_data() {
        let graph = load(vec![vec!["P", "Q", "1"], vec!["A", "B", "2"]]).expect("load");
        assert_eq!(graph.node_count(), 2);
        assert!(graph.node_index("P").is_none());
        assert_eq!(graph.edge_weight("A", "B"), Some(2));
    }

    #[test]
    fn nodes_are_deduplicated_in_first_seen_order() {
        let graph = load(rows(&[["B", "A", "1"], ["A", "C", "1"], ["C", "B", "1"]])).expect("load");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["B", "A", "C"]);
        assert_eq!(graph.node_id(NodeIndex::new(0)), Some("B"));
    }

    #[test]
    fn repeated_edge_overwrites_weight() {
        let graph = load(rows(&[["A", "B", "5"], ["A", "B", "9"]])).expect("load");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight("A", "B"), Some(9));
    }

    #[test]
    fn reversed_pair_is_the_same_edge() {
        let graph = load(rows(&[["A", "B", "5"], ["B", "A", "7"]])).expect("load");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight("A", "B"), Some(7));
        assert_eq!(graph.edge_weight("B", "A"), Some(7));
    }

    #[test]
    fn weight_whitespace_is_trimmed() {
        let graph = load(rows(&[["A", "B", " 12 "]])).expect("load");
        assert_eq!(graph.edge_weight("A", "B"), Some(12));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let graph = load(vec![
            vec!["s", "t", "w", "note"],
            vec!["A", "B", "3", "ally"],
        ])
        .expect("load");
        assert_eq!(graph.edge_weight("A", "B"), Some(3));
    }

    #[test]
    fn short_row_is_malformed() {
        let err = load(vec![vec!["s", "t", "w"], vec!["A", "B"]]).expect_err("short row");
        match err {
            Error::MalformedInput { row, reason } => {
                assert_eq!(row, 2);
                assert!(reason.contains("expected 3 fields"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_integer_weight_is_malformed() {
        let err = load(rows(&[["A", "B", "1"], ["B", "C", "2.5"]])).expect_err("bad weight");
        match err {
            Error::MalformedInput { row, reason } => {
                assert_eq!(row, 3);
                assert!(reason.contains("2.5"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn csv_reader_matches_row_loader() {
        let text = "Source,Target,Weight\nX,Y,1\nX,Y,3\nY,Z,2\n";
        let graph = EdgeGraph::from_csv_reader(text.as_bytes()).expect("csv load");
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["X", "Y", "Z"]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_weight("X", "Y"), Some(3));
        assert_eq!(graph.edge_weight("Y", "Z"), Some(2));
        assert_eq!(graph.edge_weight("X", "Z"), None);
    }

    #[test]
    fn csv_short_row_reports_row_number() {
        let text = "Source,Target,Weight\nX,Y,1\nY\n";
        let err = EdgeGraph::from_csv_reader(text.as_bytes()).expect_err("short row");
        assert!(matches!(err, Error::MalformedInput { row: 3, .. }), "{err:?}");
    }

    #[test]
    fn csv_row_number_is_the_file_line_after_blank_lines() {
        let text = "Source,Target,Weight\nA,B,1\n\nB,C,oops\n";
        let err = EdgeGraph::from_csv_reader(text.as_bytes()).expect_err("bad weight");
        assert!(matches!(err, Error::MalformedInput { row: 4, .. }), "{err:?}");
        assert!(err.to_string().contains("row 4"), "{err}");
    }

    #[test]
    fn invalid_utf8_is_csv_error() {
        let bytes: &[u8] = b"Source,Target,Weight\nA,\xff\xfe,1\n";
        let err = EdgeGraph::from_csv_reader(bytes).expect_err("invalid utf-8");
        assert!(matches!(err, Error::Csv(_)), "{err:?}");
        assert_eq!(err.code(), crate::error::ErrorCode::CsvParse);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = EdgeGraph::from_path(dir.path().join("absent.csv")).expect_err("missing");
        assert!(matches!(err, Error::Io(_)), "{err:?}");
    }
}
