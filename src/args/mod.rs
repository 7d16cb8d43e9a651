//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
mod parsers;
mod types;


pub use cli::ProbeArgs;
pub use types::{OutputFormat, PositiveUsize, SortOrder};

pub(crate) use defaults::DEFAULT_USER_AGENT;
pub(crate) use parsers::{parse_duration, parse_host_list};
