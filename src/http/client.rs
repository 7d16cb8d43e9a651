use std::time::Duration;

use reqwest::{Client, redirect};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Zero disables redirect following.
    pub redirect_limit: u32,
}

/// Builds the shared client used for every probe in a run.
///
/// # Errors
///
/// Returns an error when the redirect limit does not fit the platform or the
/// TLS backend cannot be initialised.
pub fn build_client(settings: &ClientSettings) -> Result<Client, HttpError> {
    let mut client_builder = Client::builder()
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT);

    if settings.redirect_limit == 0 {
        client_builder = client_builder.redirect(redirect::Policy::none());
    } else {
        let limit = usize::try_from(settings.redirect_limit).ok().ok_or(
            HttpError::InvalidRedirectLimit {
                value: settings.redirect_limit,
            },
        )?;
        client_builder = client_builder.redirect(redirect::Policy::limited(limit));
    }

    client_builder
        .build()
        .map_err(|source| HttpError::BuildClientFailed { source })
}
