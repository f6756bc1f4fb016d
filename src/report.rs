use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::ParseSummary;
use crate::window::{DayKey, ReportWindow};

#[cfg(test)]
use anyhow::{anyhow, bail};
#[cfg(test)]
use jsonschema::{Draft, JSONSchema};

/// Seven-day activity report for one chat export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub window: WindowBounds,
    pub daily_stats: Vec<DailyStat>,
    pub power_users: Vec<PowerUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowBounds {
    pub start: DayKey,
    pub end: DayKey,
}

impl From<ReportWindow> for WindowBounds {
    fn from(window: ReportWindow) -> Self {
        WindowBounds {
            start: window.start,
            end: window.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: DayKey,
    pub active_users: usize,
    pub new_users: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUser {
    pub user: String,
    pub active_days: usize,
}

/// JSON document written by `analyze`: the report plus run metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope<'a> {
    pub source: String,
    pub generated_at: String,
    pub parsed: ParseSummary,
    #[serde(flatten)]
    pub report: &'a Report,
}

impl ReportEnvelope<'_> {
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

impl Report {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report file: {}", path.display()))?;

        let report: Report = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))?;

        Ok(report)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    /// True when nobody posted inside the window.
    pub fn is_quiet(&self) -> bool {
        self.daily_stats.iter().all(|d| d.active_users == 0)
    }

    /// Number of users whose first in-window message falls in the window.
    ///
    /// Every active user is new exactly once, so this is also the number of
    /// distinct active users across the whole window.
    pub fn total_new_users(&self) -> usize {
        self.daily_stats.iter().map(|d| d.new_users).sum()
    }

    pub fn peak_day(&self) -> Option<&DailyStat> {
        self.daily_stats
            .iter()
            .filter(|d| d.active_users > 0)
            .max_by(|a, b| {
                a.active_users
                    .cmp(&b.active_users)
                    // Earliest day wins ties.
                    .then_with(|| b.date.cmp(&a.date))
            })
    }

    #[cfg(test)]
    /// Validate report JSON against the JSON schema
    pub fn validate_with_schema(report_json: &serde_json::Value, schema: &JSONSchema) -> Result<()> {
        match schema.validate(report_json) {
            Ok(_) => Ok(()),
            Err(errors) => {
                let error_messages: Vec<String> = errors
                    .map(|e| format!("  - {}: {}", e.instance_path, e))
                    .collect();
                bail!("Report validation failed:\n{}", error_messages.join("\n"))
            }
        }
    }

    #[cfg(test)]
    /// Load and compile the JSON schema
    pub fn load_schema(schema_path: &Path) -> Result<JSONSchema> {
        let schema_content = std::fs::read_to_string(schema_path)
            .with_context(|| format!("Failed to read schema file: {}", schema_path.display()))?;

        let schema_json: serde_json::Value =
            serde_json::from_str(&schema_content).with_context(|| {
                format!(
                    "Failed to parse schema JSON from: {}",
                    schema_path.display()
                )
            })?;

        JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_json)
            .map_err(|e| anyhow!("Failed to compile JSON schema: {}", e))
    }
}
