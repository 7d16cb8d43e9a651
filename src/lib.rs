//! Core library for the `hostprobe` CLI.
//!
//! `hostprobe` sends a fixed number of GET requests to every configured host
//! under one global concurrency bound, then reports per-host success counts,
//! error tallies and latency statistics. The binary is a thin wrapper around
//! [`run`]; the probing pieces are public so they can be driven with a custom
//! [`http::Transport`].
mod app;
pub mod args;
pub mod config;
mod entry;
pub mod error;
pub mod http;
mod logger;
pub mod metrics;
pub mod probe;
pub mod report;
pub mod shutdown;

pub use entry::run;
