pub(crate) const DEFAULT_USER_AGENT: &str = concat!("hostprobe/", env!("CARGO_PKG_VERSION"));

/// Requests per host.
pub(super) const DEFAULT_COUNT: &str = "1";
/// Global in-flight bound shared by every host.
pub(super) const DEFAULT_PARALLEL: &str = "50";
pub(super) const DEFAULT_REQUEST_TIMEOUT: &str = "10s";
pub(super) const DEFAULT_CONNECT_TIMEOUT: &str = "3s";
pub(super) const DEFAULT_REDIRECT_LIMIT: u32 = 10;
pub(super) const DEFAULT_SUCCESS_STATUS: &str = "200-399";
