//! Output layer for pretty/text/JSON parity.
//!
//! The report and any error are rendered according to an [`OutputMode`]:
//! a boxed table for humans, borderless columns for pipes, or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `NETRANK_FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use netrank_core::{Error as CoreError, ErrorCode, Report, TableStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (boxed table).
    Pretty,
    /// Plain aligned columns for pipes and scripts.
    Text,
    /// Machine-readable JSON (an array of row objects).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Core resolution logic, separated from I/O for testability.
///
/// `format_flag` is the explicit `--format` value, `json_flag` the hidden
/// `--json` alias, `format_env` the value of `NETRANK_FORMAT`.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    if let Some(val) = format_env {
        match val.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value: fall through to TTY detection
        }
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, and TTY defaults.
#[must_use]
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let env_val = std::env::var("NETRANK_FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(format_flag, json_flag, env_val.as_deref(), is_tty)
}

/// Anything the CLI can print in all three modes.
pub trait Renderable {
    /// Render for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as JSON (schema-stable).
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as plain text rows.
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;
}

impl Renderable for Report {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        w.write_all(self.render(TableStyle::Boxed).as_bytes())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, &self.to_json())?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        w.write_all(self.render(TableStyle::Plain).as_bytes())
    }
}

/// Render a single [`Renderable`] item to `w` using the given output mode.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn render_item<R: Renderable>(item: &R, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => item.render_human(w),
        OutputMode::Text => item.render_table(w),
        OutputMode::Json => {
            item.render_json(w)?;
            writeln!(w)
        }
    }
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Short summary of the error kind (e.g. "Input file unreadable").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E1001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            summary: None,
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Build from an error chain.
    ///
    /// The code comes from the first [`netrank_core::Error`] in the chain;
    /// `fallback` is used when the chain holds none (config errors).
    #[must_use]
    pub fn from_anyhow(err: &anyhow::Error, fallback: ErrorCode) -> Self {
        let code = err
            .chain()
            .find_map(|e| e.downcast_ref::<CoreError>())
            .map_or(fallback, CoreError::code);

        Self {
            summary: Some(code.message().to_string()),
            message: format!("{err:#}"),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

/// Render an error to `w` in the requested format.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn render_error(mode: OutputMode, error: &CliError, w: &mut dyn Write) -> io::Result<()> {
    if mode.is_json() {
        let wrapper = serde_json::json!({
            "error": error,
        });
        serde_json::to_writer_pretty(&mut *w, &wrapper)?;
        return writeln!(w);
    }

    match error.error_code {
        Some(ref code) => write!(w, "error[{code}]: ")?,
        None => write!(w, "error: ")?,
    }
    match error.summary {
        Some(ref summary) => writeln!(w, "{summary}: {}", error.message)?,
        None => writeln!(w, "{}", error.message)?,
    }
    if let Some(ref suggestion) = error.suggestion {
        writeln!(w, "  suggestion: {suggestion}")?;
    }
    Ok(())
}
