use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ReportError;
use crate::metrics::{HostSummary, LatencyStats};
use crate::probe::ConnectionErrorKind;

use super::Report;
use super::format::duration_micros;

#[derive(Serialize)]
struct JsonReport<'report> {
    generated_at: String,
    elapsed_ms: u64,
    count: usize,
    interrupted: bool,
    hosts: Vec<JsonHost<'report>>,
}

#[derive(Serialize)]
struct JsonHost<'report> {
    host: &'report str,
    success: usize,
    server_errors: usize,
    connection_errors: usize,
    success_rate_x100: u64,
    latency_us: Option<JsonLatency>,
    status_counts: &'report BTreeMap<u16, usize>,
    error_kinds: &'report BTreeMap<ConnectionErrorKind, usize>,
}

#[derive(Serialize)]
struct JsonLatency {
    min: u64,
    max: u64,
    avg: u64,
    std_dev: u64,
    p50: u64,
    p90: u64,
    p99: u64,
}

impl From<&LatencyStats> for JsonLatency {
    fn from(latency: &LatencyStats) -> Self {
        Self {
            min: duration_micros(latency.min),
            max: duration_micros(latency.max),
            avg: duration_micros(latency.avg),
            std_dev: duration_micros(latency.std_dev),
            p50: duration_micros(latency.p50),
            p90: duration_micros(latency.p90),
            p99: duration_micros(latency.p99),
        }
    }
}

impl<'report> From<&'report HostSummary> for JsonHost<'report> {
    fn from(summary: &'report HostSummary) -> Self {
        Self {
            host: &summary.host,
            success: summary.success_count,
            server_errors: summary.server_error_count,
            connection_errors: summary.connection_error_count,
            success_rate_x100: summary.success_rate_x100(),
            latency_us: summary.latency.as_ref().map(JsonLatency::from),
            status_counts: &summary.status_counts,
            error_kinds: &summary.connection_errors,
        }
    }
}

pub(super) fn render(report: &Report) -> Result<String, ReportError> {
    let document = JsonReport {
        generated_at: report.generated_at.to_rfc3339(),
        elapsed_ms: u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
        count: report.count,
        interrupted: report.interrupted,
        hosts: report.hosts.iter().map(JsonHost::from).collect(),
    };
    let mut rendered = serde_json::to_string_pretty(&document)
        .map_err(|source| ReportError::SerializeJson { source })?;
    rendered.push('\n');
    Ok(rendered)
}
