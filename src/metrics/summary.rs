use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::MetricsError;
use crate::probe::{ConnectionErrorKind, Outcome, ResultRecord};

use super::LatencyHistogram;

/// Scale for two-decimal percentages.
const RATE_SCALE: u128 = 10_000;

/// Latency statistics over the successful attempts of one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    /// Population standard deviation.
    pub std_dev: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p99: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSummary {
    pub host: String,
    pub success_count: usize,
    pub server_error_count: usize,
    pub connection_error_count: usize,
    /// `None` when no attempt succeeded.
    pub latency: Option<LatencyStats>,
    /// Status code of each server error.
    pub status_counts: BTreeMap<u16, usize>,
    pub connection_errors: BTreeMap<ConnectionErrorKind, usize>,
}

impl HostSummary {
    /// Reduces one host's records. The result does not depend on record order.
    ///
    /// # Errors
    ///
    /// Returns an error if the percentile histogram cannot be built.
    pub fn from_records(host: &str, records: &[ResultRecord]) -> Result<Self, MetricsError> {
        let mut summary = Self {
            host: host.to_owned(),
            success_count: 0,
            server_error_count: 0,
            connection_error_count: 0,
            latency: None,
            status_counts: BTreeMap::new(),
            connection_errors: BTreeMap::new(),
        };
        let mut success_latencies = Vec::with_capacity(records.len());

        for record in records {
            match record.outcome() {
                Outcome::Success => {
                    summary.success_count = summary.success_count.saturating_add(1);
                    success_latencies.push(record.latency());
                }
                Outcome::ServerError => {
                    summary.server_error_count = summary.server_error_count.saturating_add(1);
                    if let Some(status) = record.status() {
                        bump(&mut summary.status_counts, status);
                    }
                }
                Outcome::ConnectionError => {
                    summary.connection_error_count =
                        summary.connection_error_count.saturating_add(1);
                    if let Some(kind) = record.error() {
                        bump(&mut summary.connection_errors, kind);
                    }
                }
            }
        }

        summary.latency = latency_stats(&success_latencies)?;
        Ok(summary)
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.success_count
            .saturating_add(self.server_error_count)
            .saturating_add(self.connection_error_count)
    }

    /// Success percentage times 100 (`9950` is 99.50%).
    #[must_use]
    pub fn success_rate_x100(&self) -> u64 {
        let total = u128::try_from(self.total()).unwrap_or(u128::MAX);
        let scaled = u128::try_from(self.success_count)
            .unwrap_or(u128::MAX)
            .saturating_mul(RATE_SCALE)
            .checked_div(total)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

fn bump<K: Ord>(counts: &mut BTreeMap<K, usize>, key: K) {
    let count = counts.entry(key).or_insert(0);
    *count = count.saturating_add(1);
}

fn latency_stats(latencies: &[Duration]) -> Result<Option<LatencyStats>, MetricsError> {
    let (Some(min), Some(max)) = (
        latencies.iter().min().copied(),
        latencies.iter().max().copied(),
    ) else {
        return Ok(None);
    };
    let samples = u128::try_from(latencies.len()).unwrap_or(u128::MAX);

    let total_nanos = latencies
        .iter()
        .fold(0u128, |acc, latency| acc.saturating_add(latency.as_nanos()));
    let avg_nanos = total_nanos.checked_div(samples).unwrap_or(0);

    let squared_deviation = latencies.iter().fold(0u128, |acc, latency| {
        let diff = latency.as_nanos().abs_diff(avg_nanos);
        acc.saturating_add(diff.saturating_mul(diff))
    });
    let variance = squared_deviation.checked_div(samples).unwrap_or(0);

    let mut histogram = LatencyHistogram::new()?;
    for latency in latencies {
        histogram.record(*latency)?;
    }
    let (p50, p90, p99) = histogram.percentiles().unwrap_or((min, min, min));

    Ok(Some(LatencyStats {
        min,
        max,
        avg: duration_from_nanos(avg_nanos),
        std_dev: duration_from_nanos(variance.isqrt()),
        p50: p50.clamp(min, max),
        p90: p90.clamp(min, max),
        p99: p99.clamp(min, max),
    }))
}

fn duration_from_nanos(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
