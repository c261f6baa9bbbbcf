#![forbid(unsafe_code)]

mod output;

use anyhow::Context;
use clap::Parser;
use netrank_core::config::{self, DEFAULT_CONFIG_FILE, NetrankConfig};
use netrank_core::{EdgeGraph, ErrorCode, Report, build_report, compute_all, rank_all};
use output::{CliError, OutputMode};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_INPUT: &str = "stormofswords.csv";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "netrank: rank graph nodes by four centrality measures",
    long_about = "Load an undirected weighted edge list, score every node by degree, \
                  eigenvector, closeness and betweenness centrality, and print the \
                  four rankings side by side.",
    after_help = "EXAMPLES:\n    # Rank ./stormofswords.csv\n    netrank\n\n    # Top 10 of another edge list\n    netrank edges.csv --top 10\n\n    # Emit machine-readable output\n    netrank edges.csv --format json"
)]
struct Cli {
    /// Edge list CSV: a header row, then `source,target,weight` rows.
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Config file (defaults to ./netrank.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, hide = true)]
    json: bool,

    /// Only print the first N ranks.
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Decimal digits per score.
    #[arg(long)]
    precision: Option<usize>,

    /// Iteration bound for eigenvector centrality.
    #[arg(long)]
    max_iter: Option<usize>,

    /// Convergence tolerance for eigenvector centrality.
    #[arg(long)]
    tolerance: Option<f64>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }

    /// Apply flag overrides on top of file values.
    fn apply_overrides(&self, cfg: &mut NetrankConfig) {
        if let Some(precision) = self.precision {
            cfg.report.precision = precision;
        }
        if let Some(max_iter) = self.max_iter {
            cfg.eigenvector.max_iter = max_iter;
        }
        if let Some(tolerance) = self.tolerance {
            cfg.eigenvector.tolerance = tolerance;
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("NETRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "netrank=debug,info"
        } else {
            "netrank=info,warn"
        })
    });

    let format = env::var("NETRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<NetrankConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_config_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    cli.apply_overrides(&mut cfg);
    debug!(?cfg, "resolved config");
    Ok(cfg)
}

fn generate_report(cli: &Cli, cfg: &NetrankConfig) -> anyhow::Result<Report> {
    let graph = EdgeGraph::from_path(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;

    let scores = compute_all(&graph, cfg).context("Failed to compute centrality")?;
    let ranked = rank_all(&scores);
    let report = build_report(&ranked, &scores, cfg.report.precision)
        .context("Failed to build report")?;

    info!(rows = report.len(), "report ready");
    Ok(match cli.top {
        Some(n) => report.head(n),
        None => report,
    })
}

fn run(cli: &Cli, mode: OutputMode) -> Result<(), CliError> {
    let cfg =
        resolve_config(cli).map_err(|e| CliError::from_anyhow(&e, ErrorCode::ConfigParseError))?;
    let report =
        generate_report(cli, &cfg).map_err(|e| CliError::from_anyhow(&e, ErrorCode::InputUnreadable))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render_item(&report, mode, &mut out)
        .and_then(|()| out.flush())
        .map_err(|e| CliError::new(format!("Failed to write report: {e}")))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let mode = cli.output_mode();
    match run(&cli, mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = output::render_error(mode, &err, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}
