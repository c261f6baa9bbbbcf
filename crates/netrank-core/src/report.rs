//! Side-by-side ranking report.
//!
//! Row `i` of the report holds the `i`-th ranked node of each metric,
//! formatted as `node(score)`. The four cells of a row are generally
//! different nodes: each column is ranked independently.
//!
//! ```text
//!      degree           eigenvector      closeness        betweeness
//!  0   Tyrion(0.1509)   Tyrion(0.2749)   Tyrion(0.5120)   Jon(0.2327)
//!  1   Jon(0.1415)      Cersei(0.2536)   Sansa(0.5068)    Robert(0.2070)
//! ```

use prettytable::format::{self, TableFormat};
use prettytable::{Cell, Row, Table};
use serde_json::{Map, Value, json};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::metrics::{CentralityScores, Metric};
use crate::rank::RankedLists;

/// One report line: a `node(score)` cell per metric, in [`Metric::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cells: [String; 4],
}

impl ReportRow {
    /// Cell for `metric`.
    #[must_use]
    pub fn cell(&self, metric: Metric) -> &str {
        &self.cells[metric as usize]
    }
}

/// Table layout used by [`Report::to_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Box-drawing borders around every cell.
    Boxed,
    /// Space-separated columns, no borders.
    Plain,
}

impl TableStyle {
    fn format(self) -> TableFormat {
        match self {
            Self::Boxed => *format::consts::FORMAT_BOX_CHARS,
            Self::Plain => format::FormatBuilder::new().padding(0, 2).build(),
        }
    }
}

/// The rendered comparison of all four rankings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows (all rows if `n` exceeds the length).
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Column headers: an unlabeled index column, then one per metric.
    #[must_use]
    pub const fn headers() -> [&'static str; 5] {
        [
            "",
            Metric::Degree.column_label(),
            Metric::Eigenvector.column_label(),
            Metric::Closeness.column_label(),
            Metric::Betweenness.column_label(),
        ]
    }

    /// Build a table with a row-index column and one column per metric.
    #[must_use]
    pub fn to_table(&self, style: TableStyle) -> Table {
        let mut table = Table::new();
        table.set_format(style.format());
        table.set_titles(Row::new(
            Self::headers().iter().map(|h| Cell::new(h)).collect(),
        ));

        for (i, row) in self.rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(5);
            cells.push(Cell::new(&i.to_string()).style_spec("r"));
            cells.extend(row.cells.iter().map(|c| Cell::new(c)));
            table.add_row(Row::new(cells));
        }

        table
    }

    /// Render as a string using `style`.
    #[must_use]
    pub fn render(&self, style: TableStyle) -> String {
        self.to_table(style).to_string()
    }

    /// JSON array of row objects keyed by column label, plus a `rank` field.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut obj = Map::new();
                obj.insert("rank".to_string(), json!(i));
                for (metric, cell) in Metric::ALL.iter().zip(&row.cells) {
                    obj.insert(metric.column_label().to_string(), json!(cell));
                }
                Value::Object(obj)
            })
            .collect();
        Value::Array(rows)
    }
}

/// Zip the four ranked lists into report rows.
///
/// Each cell is `node(score)` with `precision` decimal digits.
///
/// # Errors
///
/// Returns [`Error::InconsistentRanking`] if the ranked lists differ in
/// length or a ranked node has no score.
#[instrument(skip(ranked, scores))]
pub fn build_report(
    ranked: &RankedLists,
    scores: &CentralityScores,
    precision: usize,
) -> Result<Report> {
    let expected = ranked.degree.len();
    for metric in Metric::ALL {
        let found = ranked.get(metric).len();
        if found != expected {
            return Err(Error::InconsistentRanking {
                metric,
                detail: format!("{found} ranked nodes, expected {expected}"),
            });
        }
    }

    let mut rows = Vec::with_capacity(expected);
    for i in 0..expected {
        let mut cells: [String; 4] = Default::default();
        for (slot, metric) in cells.iter_mut().zip(Metric::ALL) {
            *slot = format_cell(ranked, scores, metric, i, precision)?;
        }
        rows.push(ReportRow { cells });
    }

    Ok(Report { rows })
}

fn format_cell(
    ranked: &RankedLists,
    scores: &CentralityScores,
    metric: Metric,
    i: usize,
    precision: usize,
) -> Result<String> {
    let node = ranked
        .get(metric)
        .get(i)
        .ok_or_else(|| Error::InconsistentRanking {
            metric,
            detail: format!("no node at rank {i}"),
        })?;
    let score = scores
        .get(metric)
        .get(node)
        .ok_or_else(|| Error::InconsistentRanking {
            metric,
            detail: format!("ranked node `{node}` has no score"),
        })?;
    Ok(format!("{node}({score:.precision$})"))
}
