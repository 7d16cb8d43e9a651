use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::{AcquireError, Semaphore, SemaphorePermit};
use tokio::time::Instant;
use tracing::{debug, warn};
use url::Url;

use crate::http::Transport;
use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

use super::{ConnectionErrorKind, ResultRecord, StatusPolicy};

/// Everything an attempt needs besides its host. Cheap to clone per host task.
#[derive(Clone)]
pub(crate) struct ProbeContext {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) global_permits: Arc<Semaphore>,
    pub(crate) per_host_limit: Option<usize>,
    pub(crate) request_timeout: Duration,
    pub(crate) policy: Arc<StatusPolicy>,
    pub(crate) shutdown: ShutdownReceiver,
}

/// Runs exactly `count` attempts against one host.
pub(crate) struct HostProber {
    host: Arc<str>,
    count: usize,
    context: ProbeContext,
}

struct AttemptPermits<'pool> {
    _host: Option<SemaphorePermit<'pool>>,
    _global: SemaphorePermit<'pool>,
}

impl HostProber {
    pub(crate) const fn new(host: Arc<str>, count: usize, context: ProbeContext) -> Self {
        Self {
            host,
            count,
            context,
        }
    }

    /// Returns one record per attempt, in attempt order.
    pub(crate) async fn run(self) -> Vec<ResultRecord> {
        let url = match validate_host_url(&self.host) {
            Ok(url) => url,
            Err(reason) => {
                warn!("Invalid host URL '{}': {}", self.host, reason);
                return fill_records(&self.host, self.count, ConnectionErrorKind::InvalidUrl);
            }
        };

        let host_permits = self.context.per_host_limit.map(Semaphore::new);
        let attempts = (0..self.count).map(|slot| self.attempt(slot, &url, host_permits.as_ref()));
        join_all(attempts).await
    }

    async fn attempt(
        &self,
        slot: usize,
        url: &Url,
        host_permits: Option<&Semaphore>,
    ) -> ResultRecord {
        let mut shutdown = self.context.shutdown.clone();

        let permits = tokio::select! {
            biased;
            () = wait_for_shutdown(&mut shutdown) => {
                return self.connection_error(ConnectionErrorKind::Cancelled, Duration::ZERO);
            }
            permits = self.acquire(host_permits) => permits,
        };
        let Ok(permits) = permits else {
            return self.connection_error(ConnectionErrorKind::Internal, Duration::ZERO);
        };

        let start = Instant::now();
        let result = tokio::select! {
            biased;
            () = wait_for_shutdown(&mut shutdown) => None,
            result = tokio::time::timeout(
                self.context.request_timeout,
                self.context.transport.get(url),
            ) => Some(result),
        };
        let latency = start.elapsed();
        drop(permits);

        let record = match result {
            None => self.connection_error(ConnectionErrorKind::Cancelled, latency),
            Some(Err(_elapsed)) => self.connection_error(ConnectionErrorKind::Timeout, latency),
            Some(Ok(Ok(status))) => ResultRecord::from_status(
                Arc::clone(&self.host),
                status,
                latency,
                &self.context.policy,
            ),
            Some(Ok(Err(err))) => {
                debug!("{} attempt {} failed: {}", self.host, slot, err);
                self.connection_error(ConnectionErrorKind::from(&err), latency)
            }
        };
        debug!(
            host = %self.host,
            slot,
            outcome = ?record.outcome(),
            status = ?record.status(),
            latency_ms = latency.as_millis(),
            "attempt finished"
        );
        record
    }

    async fn acquire<'pool>(
        &'pool self,
        host_permits: Option<&'pool Semaphore>,
    ) -> Result<AttemptPermits<'pool>, AcquireError> {
        // Host permit first so a saturated host never parks a global slot.
        let host = match host_permits {
            Some(permits) => Some(permits.acquire().await?),
            None => None,
        };
        let global = self.context.global_permits.acquire().await?;
        Ok(AttemptPermits {
            _host: host,
            _global: global,
        })
    }

    fn connection_error(&self, kind: ConnectionErrorKind, latency: Duration) -> ResultRecord {
        ResultRecord::connection_error(Arc::clone(&self.host), kind, latency)
    }
}

/// `count` identical connection errors, for hosts that never reach the network.
pub(crate) fn fill_records(
    host: &Arc<str>,
    count: usize,
    kind: ConnectionErrorKind,
) -> Vec<ResultRecord> {
    (0..count)
        .map(|_| ResultRecord::connection_error(Arc::clone(host), kind, Duration::ZERO))
        .collect()
}

/// A probe target must parse, use http or https, and name a host.
pub(crate) fn validate_host_url(host: &str) -> Result<Url, String> {
    let url = Url::parse(host).map_err(|err| err.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err("missing host".to_owned());
    }
    Ok(url)
}
