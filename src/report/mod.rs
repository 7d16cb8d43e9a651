//! Rendering and persisting the per-host summaries of a run.
mod format;
mod json;
mod text;


use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::args::{OutputFormat, SortOrder};
use crate::error::ReportError;
use crate::metrics::HostSummary;

/// Everything the reporter prints about one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub elapsed: Duration,
    /// Attempts per host.
    pub count: usize,
    /// Set when the run was stopped before every attempt finished.
    pub interrupted: bool,
    pub hosts: Vec<HostSummary>,
}

impl Report {
    #[must_use]
    pub fn new(hosts: Vec<HostSummary>, count: usize, elapsed: Duration, interrupted: bool) -> Self {
        Self {
            generated_at: Local::now(),
            elapsed,
            count,
            interrupted,
            hosts,
        }
    }

    /// Reorders hosts. Latency order is by average, hosts without latency
    /// data last; ties keep input order.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Input => {}
            SortOrder::Latency => self.hosts.sort_by_key(|summary| {
                (
                    summary.latency.is_none(),
                    summary.latency.map(|latency| latency.avg),
                )
            }),
        }
    }

    /// Renders the report; `color` only affects the text format.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be formatted.
    pub fn render(&self, format: OutputFormat, color: bool) -> Result<String, ReportError> {
        match format {
            OutputFormat::Text => text::render(self, color),
            OutputFormat::Json => json::render(self),
        }
    }
}

/// Writes a rendered report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_report_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
