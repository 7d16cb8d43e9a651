use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{error, info};

use crate::args::PositiveUsize;
use crate::error::{MetricsError, ValidationError};
use crate::http::Transport;
use crate::metrics::HostSummary;
use crate::shutdown::ShutdownReceiver;

use super::prober::{HostProber, ProbeContext, fill_records};
use super::{ConnectionErrorKind, ResultRecord, StatusPolicy};

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Attempts per host.
    pub count: PositiveUsize,
    /// In-flight bound shared by all hosts.
    pub max_in_flight: PositiveUsize,
    pub per_host_limit: Option<PositiveUsize>,
    pub request_timeout: Duration,
    pub policy: StatusPolicy,
}

/// Fans host probers out over a single global permit pool.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    settings: DispatchSettings,
}

impl Dispatcher {
    /// Creates a dispatcher for the given transport.
    ///
    /// # Errors
    ///
    /// Returns an error when the concurrency bound exceeds what the permit
    /// pool can hold.
    pub fn new(
        transport: Arc<dyn Transport>,
        settings: DispatchSettings,
    ) -> Result<Self, ValidationError> {
        for bound in [Some(settings.max_in_flight), settings.per_host_limit]
            .into_iter()
            .flatten()
        {
            if bound.get() > Semaphore::MAX_PERMITS {
                return Err(ValidationError::ConcurrencyTooLarge {
                    value: bound.get(),
                    max: Semaphore::MAX_PERMITS,
                });
            }
        }
        Ok(Self {
            transport,
            settings,
        })
    }

    /// Probes every host and waits for all of them.
    ///
    /// Hosts are deduplicated by exact string; every remaining host ends up
    /// with exactly `count` records, whatever happens to its requests.
    pub async fn run(&self, hosts: &[String], shutdown: ShutdownReceiver) -> RunResults {
        let hosts = dedup_hosts(hosts);
        let count = self.settings.count.get();
        let context = ProbeContext {
            transport: Arc::clone(&self.transport),
            global_permits: Arc::new(Semaphore::new(self.settings.max_in_flight.get())),
            per_host_limit: self.settings.per_host_limit.map(PositiveUsize::get),
            request_timeout: self.settings.request_timeout,
            policy: Arc::new(self.settings.policy.clone()),
            shutdown,
        };

        info!(
            "Probing {} host(s), {} request(s) each, at most {} in flight",
            hosts.len(),
            count,
            self.settings.max_in_flight.get()
        );
        let started = Instant::now();

        let handles: Vec<_> = hosts
            .into_iter()
            .map(|host| {
                let host: Arc<str> = Arc::from(host);
                let prober = HostProber::new(Arc::clone(&host), count, context.clone());
                (host, tokio::spawn(prober.run()))
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (host, handle) in handles {
            let records = match handle.await {
                Ok(records) => records,
                Err(err) => {
                    error!("Prober task for {} failed: {}", host, err);
                    fill_records(&host, count, ConnectionErrorKind::Internal)
                }
            };
            results.push(HostRecords {
                host: host.to_string(),
                records,
            });
        }

        let elapsed = started.elapsed();
        info!("Probing finished in {}ms", elapsed.as_millis());
        RunResults {
            hosts: results,
            elapsed,
        }
    }
}

/// Removes repeated hosts, keeping the first occurrence of each exact string.
#[must_use]
pub fn dedup_hosts<S: AsRef<str>>(hosts: &[S]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(hosts.len());
    hosts
        .iter()
        .map(AsRef::as_ref)
        .filter(|host| seen.insert(*host))
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Clone)]
pub struct HostRecords {
    pub host: String,
    pub records: Vec<ResultRecord>,
}

/// Records of a finished run, in host input order.
#[derive(Debug, Clone)]
pub struct RunResults {
    hosts: Vec<HostRecords>,
    elapsed: Duration,
}

impl RunResults {
    #[must_use]
    pub fn get(&self, host: &str) -> Option<&[ResultRecord]> {
        self.hosts
            .iter()
            .find(|entry| entry.host == host)
            .map(|entry| entry.records.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &HostRecords> {
        self.hosts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    #[must_use]
    pub fn total_records(&self) -> usize {
        self.hosts.iter().map(|entry| entry.records.len()).sum()
    }

    /// True when any attempt was cut short by shutdown.
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.hosts.iter().any(|entry| {
            entry
                .records
                .iter()
                .any(|record| record.error() == Some(ConnectionErrorKind::Cancelled))
        })
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Aggregates every host, keeping input order.
    ///
    /// # Errors
    ///
    /// Returns an error if a latency histogram cannot be built.
    pub fn summarize(&self) -> Result<Vec<HostSummary>, MetricsError> {
        self.hosts
            .iter()
            .map(|entry| HostSummary::from_records(&entry.host, &entry.records))
            .collect()
    }
}
