//! HTTP client construction and the transport seam the probers call through.
mod client;
mod transport;


pub use client::{ClientSettings, build_client};
pub use transport::{HttpTransport, Transport};
