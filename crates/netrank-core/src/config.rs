//! Tunables for the metric computations and the report.
//!
//! Read from a TOML file (`netrank.toml` by default). Every section and
//! field is optional; anything missing falls back to the defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "netrank.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetrankConfig {
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
    #[serde(default)]
    pub closeness: ClosenessConfig,
    #[serde(default)]
    pub betweenness: BetweennessConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorConfig {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Per-node convergence tolerance; iteration stops once the L1 change
    /// falls below `node_count * tolerance`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosenessConfig {
    /// Scale by the fraction of reachable nodes (Wasserman-Faust).
    #[serde(default = "default_true")]
    pub wf_improved: bool,
}

impl Default for ClosenessConfig {
    fn default() -> Self {
        Self {
            wf_improved: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetweennessConfig {
    #[serde(default = "default_true")]
    pub normalized: bool,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            normalized: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal digits printed after each score.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

impl NetrankConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse netrank config")
    }
}

/// Load a config file that must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<NetrankConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<NetrankConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `path` if it exists, otherwise return defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_or_default(path: &Path) -> Result<NetrankConfig> {
    if !path.exists() {
        return Ok(NetrankConfig::default());
    }
    load_config(path)
}

const fn default_true() -> bool {
    true
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_precision() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = NetrankConfig::default();
        assert_eq!(cfg.eigenvector.max_iter, 100);
        assert!((cfg.eigenvector.tolerance - 1e-6).abs() < f64::EPSILON);
        assert!(cfg.closeness.wf_improved);
        assert!(cfg.betweenness.normalized);
        assert_eq!(cfg.report.precision, 6);
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = NetrankConfig::from_toml_str("").expect("parse empty");
        assert_eq!(cfg, NetrankConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = NetrankConfig::from_toml_str(
            "[eigenvector]\nmax_iter = 1000\n\n[report]\nprecision = 3\n",
        )
        .expect("parse partial");
        assert_eq!(cfg.eigenvector.max_iter, 1000);
        assert!((cfg.eigenvector.tolerance - 1e-6).abs() < f64::EPSILON);
        assert_eq!(cfg.report.precision, 3);
        assert!(cfg.betweenness.normalized);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = NetrankConfig::from_toml_str("[report]\nprecision = \"six\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_or_default(&dir.path().join(DEFAULT_CONFIG_FILE))
            .expect("missing file is fine");
        assert_eq!(cfg, NetrankConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let mut f = std::fs::File::create(&path).expect("create config");
        writeln!(f, "[betweenness]\nnormalized = false").expect("write config");

        let cfg = load_config(&path).expect("load config");
        assert!(!cfg.betweenness.normalized);
    }

    #[test]
    fn load_config_requires_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_config(&dir.path().join("nope.toml")).is_err());
    }
}
