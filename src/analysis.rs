/// Analysis entry points used by the CLI and by embedding callers.
///
/// Runs the parser over a whole export and hands the events to the
/// aggregator. Failures a caller has to react to (nothing to read, nothing
/// that looks like a chat message) come back as `AnalyzeError`; a window
/// without activity is a normal, all-zero report.
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::aggregator::aggregate;
use crate::dialect::ParserConfig;
use crate::parser::parse_text;
use crate::report::Report;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("No input provided")]
    EmptyInput,

    #[error(
        "No valid messages found in {lines_read} lines. Please upload an exported WhatsApp chat .txt file."
    )]
    NoMessages { lines_read: usize },

    #[error("Failed to read chat export {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Line accounting for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    pub lines_read: usize,
    pub events_parsed: usize,
    pub lines_skipped: usize,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: Report,
    pub parsed: ParseSummary,
}

/// Analyse a whole chat export relative to the reference instant `now`.
pub fn analyze(
    text: &str,
    now: &NaiveDateTime,
    config: &ParserConfig,
) -> Result<Analysis, AnalyzeError> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    if body.trim().is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }

    let parsed = parse_text(text, config);
    if parsed.events.is_empty() {
        tracing::warn!(lines_read = parsed.lines_read, "No message headers found");
        return Err(AnalyzeError::NoMessages {
            lines_read: parsed.lines_read,
        });
    }

    let report = aggregate(&parsed.events, now);
    let summary = ParseSummary {
        lines_read: parsed.lines_read,
        events_parsed: parsed.events.len(),
        lines_skipped: parsed.lines_skipped,
    };

    tracing::info!(
        events = summary.events_parsed,
        skipped = summary.lines_skipped,
        window_start = %report.window.start,
        window_end = %report.window.end,
        power_users = report.power_users.len(),
        "Analysis complete"
    );

    Ok(Analysis {
        report,
        parsed: summary,
    })
}

/// Read a chat export from disk and analyse it.
pub fn analyze_file(
    path: &Path,
    now: &NaiveDateTime,
    config: &ParserConfig,
) -> Result<Analysis, AnalyzeError> {
    let bytes = std::fs::read(path).map_err(|source| AnalyzeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // Exports occasionally carry stray invalid bytes inside message bodies.
    let text = String::from_utf8_lossy(&bytes);
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read chat export");

    analyze(&text, now, config)
}
