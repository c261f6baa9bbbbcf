use std::fmt;

use thiserror::Error;

use crate::metrics::Metric;

/// Result alias for pipeline stages.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised while loading, scoring, ranking or reporting.
#[derive(Debug, Error)]
pub enum Error {
    /// A data row has fewer than three fields or a non-integer weight.
    #[error("malformed input at row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    /// Degree centrality is undefined for fewer than two nodes.
    #[error("graph has {nodes} node(s); centrality needs at least 2")]
    DegenerateGraph { nodes: usize },

    /// Eigenvector power iteration hit its iteration bound.
    #[error("eigenvector centrality did not converge within {iterations} iterations")]
    Convergence { iterations: usize },

    /// Ranked lists disagree with each other or with their score maps.
    #[error("inconsistent {metric} ranking: {detail}")]
    InconsistentRanking { metric: Metric, detail: String },

    #[error("invalid CSV input")]
    Csv(#[from] csv::Error),

    #[error("cannot read input")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedInput { .. } => ErrorCode::MalformedInput,
            Self::DegenerateGraph { .. } => ErrorCode::DegenerateGraph,
            Self::Convergence { .. } => ErrorCode::ConvergenceFailed,
            Self::InconsistentRanking { .. } => ErrorCode::InconsistentRanking,
            Self::Csv(_) => ErrorCode::CsvParse,
            Self::Io(_) => ErrorCode::InputUnreadable,
        }
    }
}

/// Machine-readable error codes surfaced by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedInput,
    CsvParse,
    InputUnreadable,
    ConfigParseError,
    DegenerateGraph,
    ConvergenceFailed,
    InconsistentRanking,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedInput => "E1001",
            Self::CsvParse => "E1002",
            Self::InputUnreadable => "E1003",
            Self::ConfigParseError => "E1004",
            Self::DegenerateGraph => "E2001",
            Self::ConvergenceFailed => "E2002",
            Self::InconsistentRanking => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedInput => "Malformed edge row",
            Self::CsvParse => "CSV parse error",
            Self::InputUnreadable => "Input file unreadable",
            Self::ConfigParseError => "Config file parse error",
            Self::DegenerateGraph => "Graph too small",
            Self::ConvergenceFailed => "Eigenvector iteration did not converge",
            Self::InconsistentRanking => "Internal ranking mismatch",
        }
    }

    /// Optional remediation hint shown after the error message.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedInput => {
                Some("Each data row needs `source,target,weight` with an integer weight.")
            }
            Self::CsvParse => Some("Check the file is comma-separated UTF-8 text."),
            Self::InputUnreadable => Some("Check the input path and read permissions."),
            Self::ConfigParseError => Some("Fix syntax in netrank.toml and retry."),
            Self::DegenerateGraph => Some("Provide at least one edge between two distinct nodes."),
            Self::ConvergenceFailed => {
                Some("Raise `eigenvector.max_iter` or loosen `eigenvector.tolerance`.")
            }
            Self::InconsistentRanking => Some("This is a bug; please report it with the input file."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
