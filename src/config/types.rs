use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, SortOrder, parse_duration};
use crate::error::ValidationError;

/// On-disk mirror of the command-line flags. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub hosts: Option<HostsValue>,
    pub file: Option<String>,
    pub count: Option<usize>,
    #[serde(alias = "concurrency")]
    pub parallel: Option<usize>,
    pub per_host: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub run_timeout: Option<DurationValue>,
    pub redirect: Option<u32>,
    pub success_status: Option<String>,
    pub output: Option<String>,
    pub format: Option<OutputFormat>,
    pub sort: Option<SortOrder>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
}

/// Hosts as a list or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HostsValue {
    List(Vec<String>),
    Text(String),
}

impl HostsValue {
    /// Comma-separated form accepted by `--hosts`.
    #[must_use]
    pub fn to_host_list(&self) -> String {
        match self {
            HostsValue::List(hosts) => hosts.join(","),
            HostsValue::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
