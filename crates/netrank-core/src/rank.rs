//! Order nodes by descending score.
//!
//! Sorting is stable, so nodes with equal scores keep the order in which
//! they first appeared in the input (the [`ScoreMap`] iteration order).

use serde::Serialize;

use crate::metrics::{CentralityScores, Metric, ScoreMap};

/// Node identities of one metric, highest score first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedList {
    pub metric: Metric,
    pub nodes: Vec<String>,
}

impl RankedList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at rank `i` (0 = highest score).
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&str> {
        self.nodes.get(i).map(String::as_str)
    }
}

/// One ranked list per metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedLists {
    pub degree: RankedList,
    pub eigenvector: RankedList,
    pub closeness: RankedList,
    pub betweenness: RankedList,
}

impl RankedLists {
    /// Ranked list for `metric`.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> &RankedList {
        match metric {
            Metric::Degree => &self.degree,
            Metric::Eigenvector => &self.eigenvector,
            Metric::Closeness => &self.closeness,
            Metric::Betweenness => &self.betweenness,
        }
    }
}

/// Rank every node of `scores` by descending score.
#[must_use]
pub fn rank(scores: &ScoreMap) -> RankedList {
    let mut entries: Vec<(&str, f64)> = scores.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));

    RankedList {
        metric: scores.metric(),
        nodes: entries.into_iter().map(|(id, _)| id.to_string()).collect(),
    }
}

/// Rank all four metrics.
#[must_use]
pub fn rank_all(scores: &CentralityScores) -> RankedLists {
    RankedLists {
        degree: rank(&scores.degree),
        eigenvector: rank(&scores.eigenvector),
        closeness: rank(&scores.closeness),
        betweenness: rank(&scores.betweenness),
    }
}
