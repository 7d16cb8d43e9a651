use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, ProbeArgs};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::probe::StatusPolicy;

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments. Flags given on the command
/// line always win.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if config.hosts.is_some() && config.file.is_some() {
        return Err(AppError::config(ConfigError::Conflict {
            left: "hosts",
            right: "file",
        }));
    }

    let targets_on_cli = is_cli(matches, "hosts") || is_cli(matches, "file");
    if !targets_on_cli {
        if let Some(hosts) = config.hosts.as_ref() {
            args.hosts = Some(hosts.to_host_list());
        }
        if let Some(file) = config.file.clone() {
            args.file = Some(file);
        }
    }

    if !is_cli(matches, "count")
        && let Some(count) = config.count
    {
        args.count = ensure_positive_usize(count, "count")?;
    }

    if !is_cli(matches, "parallel")
        && let Some(parallel) = config.parallel
    {
        args.parallel = ensure_positive_usize(parallel, "parallel")?;
    }

    if !is_cli(matches, "per_host")
        && let Some(per_host) = config.per_host
    {
        args.per_host = Some(ensure_positive_usize(per_host, "per_host")?);
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = config_duration(timeout, "timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = config_duration(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "run_timeout")
        && let Some(timeout) = config.run_timeout.as_ref()
    {
        args.run_timeout = Some(config_duration(timeout, "run_timeout")?);
    }

    if !is_cli(matches, "redirect_limit")
        && let Some(redirect) = config.redirect
    {
        args.redirect_limit = redirect;
    }

    if !is_cli(matches, "success_status")
        && let Some(policy) = config.success_status.as_deref()
    {
        args.success_status = policy.parse::<StatusPolicy>().map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "success_status",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "format")
        && let Some(format) = config.format
    {
        args.format = format;
    }

    if !is_cli(matches, "sort")
        && let Some(sort) = config.sort
    {
        args.sort = sort;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn config_duration(
    value: &DurationValue,
    field: &'static str,
) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err: ValidationError| {
        AppError::config(ConfigError::InvalidField { field, source: err })
    })
}
