use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_COUNT, DEFAULT_PARALLEL, DEFAULT_REDIRECT_LIMIT,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SUCCESS_STATUS,
};
use super::parsers::{parse_duration_arg, parse_positive_usize, parse_status_policy};
use super::types::{OutputFormat, PositiveUsize, SortOrder};
use crate::probe::StatusPolicy;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP availability and latency prober: sends N GET requests to each host with a global concurrency bound and reports per-host success, errors, and latency."
)]
pub struct ProbeArgs {
    /// Comma-separated list of URLs to probe
    #[arg(long, short = 'H', conflicts_with = "file")]
    pub hosts: Option<String>,

    /// File with one URL per line (blank lines and '#' comments are skipped)
    #[arg(long, short = 'F', conflicts_with = "hosts")]
    pub file: Option<String>,

    /// Number of requests per host
    #[arg(
        long,
        short = 'C',
        default_value = DEFAULT_COUNT,
        value_parser = parse_positive_usize
    )]
    pub count: PositiveUsize,

    /// Maximum simultaneous in-flight requests across all hosts
    #[arg(
        long,
        short = 'P',
        default_value = DEFAULT_PARALLEL,
        value_parser = parse_positive_usize
    )]
    pub parallel: PositiveUsize,

    /// Maximum simultaneous in-flight requests per host (unlimited when unset)
    #[arg(long = "per-host", value_parser = parse_positive_usize)]
    pub per_host: Option<PositiveUsize>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = DEFAULT_REQUEST_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = DEFAULT_CONNECT_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Stop the whole run after this long; unfinished requests count as connection errors
    #[arg(long = "run-timeout", value_parser = parse_duration_arg)]
    pub run_timeout: Option<Duration>,

    /// Maximum redirects to follow (0 disables redirects)
    #[arg(long = "redirect", default_value_t = DEFAULT_REDIRECT_LIMIT)]
    pub redirect_limit: u32,

    /// Status codes counted as success, as codes or ranges (e.g. 200-299,304)
    #[arg(
        long = "success-status",
        default_value = DEFAULT_SUCCESS_STATUS,
        value_parser = parse_status_policy
    )]
    pub success_status: StatusPolicy,

    /// Write the report to this file (always without colors)
    #[arg(long, short = 'O')]
    pub output: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Host order in the report
    #[arg(long, value_enum, default_value = "input")]
    pub sort: SortOrder,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by HOSTPROBE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./hostprobe.toml or ./hostprobe.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
