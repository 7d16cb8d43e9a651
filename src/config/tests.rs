use super::{
    apply_config, load_config_file,
    types::{ConfigFile, DurationValue, HostsValue},
};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{OutputFormat, ProbeArgs, SortOrder};
use crate::error::{AppError, ConfigError};

fn parse_with_matches(args: &[&str]) -> Result<(ProbeArgs, clap::ArgMatches), String> {
    let matches = ProbeArgs::command()
        .try_get_matches_from(args)
        .map_err(|err| err.to_string())?;
    let parsed = ProbeArgs::from_arg_matches(&matches).map_err(|err| err.to_string())?;
    Ok((parsed, matches))
}

fn write_config(name: &str, content: &str) -> Result<(tempfile::TempDir, ConfigFile), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join(name);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    Ok((dir, config))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let content = r#"
hosts = ["https://a.test", "https://b.test"]
count = 5
parallel = 8
timeout = "500ms"
connect_timeout = 2
success_status = "200-299"
format = "json"
sort = "latency"
"#;
    let (_dir, config) = write_config("hostprobe.toml", content)?;

    match config.hosts.as_ref() {
        Some(HostsValue::List(hosts)) if hosts.len() == 2 => {}
        other => return Err(format!("Unexpected hosts: {:?}", other)),
    }
    if config.count != Some(5) || config.parallel != Some(8) {
        return Err("Unexpected count/parallel".to_owned());
    }
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| "Missing timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_millis(500) {
        return Err(format!("Unexpected timeout: {:?}", timeout));
    }
    if config.format != Some(OutputFormat::Json) || config.sort != Some(SortOrder::Latency) {
        return Err("Unexpected report settings".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let content = r#"{
  "file": "hosts.txt",
  "concurrency": 4,
  "run_timeout": "2m",
  "no_color": true
}"#;
    let (_dir, config) = write_config("hostprobe.json", content)?;

    if config.file.as_deref() != Some("hosts.txt") {
        return Err("Unexpected file".to_owned());
    }
    if config.parallel != Some(4) {
        return Err("Expected 'concurrency' alias to set parallel".to_owned());
    }
    let run_timeout = config
        .run_timeout
        .as_ref()
        .ok_or_else(|| "Missing run_timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if run_timeout != Duration::from_secs(120) {
        return Err(format!("Unexpected run_timeout: {:?}", run_timeout));
    }
    if config.no_color != Some(true) {
        return Err("Expected no_color".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("hostprobe.yaml");
    std::fs::write(&path, "count: 1").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(other) => Err(format!("Unexpected error: {}", other)),
        Ok(_) => Err("Expected yaml config to be rejected".to_owned()),
    }
}

#[test]
fn config_fills_values_missing_on_cli() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["hostprobe"])?;
    let config = ConfigFile {
        hosts: Some(HostsValue::Text("https://a.test, https://b.test".to_owned())),
        count: Some(3),
        per_host: Some(2),
        timeout: Some(DurationValue::Seconds(4)),
        redirect: Some(0),
        success_status: Some("200-204".to_owned()),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.hosts.as_deref() != Some("https://a.test, https://b.test") {
        return Err(format!("Unexpected hosts: {:?}", args.hosts));
    }
    if args.count.get() != 3 || args.per_host.map(|value| value.get()) != Some(2) {
        return Err("Unexpected count/per_host".to_owned());
    }
    if args.request_timeout != Duration::from_secs(4) || args.redirect_limit != 0 {
        return Err("Unexpected timeout/redirect".to_owned());
    }
    if args.success_status.is_success(301) {
        return Err("Config success policy not applied".to_owned());
    }
    Ok(())
}

#[test]
fn cli_values_win_over_config() -> Result<(), String> {
    let (mut args, matches) =
        parse_with_matches(&["hostprobe", "-F", "cli.txt", "-C", "7", "--timeout", "2s"])?;
    let config = ConfigFile {
        hosts: Some(HostsValue::List(vec!["https://config.test".to_owned()])),
        count: Some(1),
        timeout: Some(DurationValue::Text("9s".to_owned())),
        parallel: Some(3),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.hosts.is_some() || args.file.as_deref() != Some("cli.txt") {
        return Err("CLI target source must win".to_owned());
    }
    if args.count.get() != 7 || args.request_timeout != Duration::from_secs(2) {
        return Err("CLI values must win".to_owned());
    }
    if args.parallel.get() != 3 {
        return Err("Config should fill parallel".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_hosts_and_file_together() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["hostprobe"])?;
    let config = ConfigFile {
        hosts: Some(HostsValue::Text("https://a.test".to_owned())),
        file: Some("hosts.txt".to_owned()),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::Conflict { .. })) => Ok(()),
        Err(other) => Err(format!("Unexpected error: {}", other)),
        Ok(()) => Err("Expected conflict".to_owned()),
    }
}

#[test]
fn config_rejects_zero_count() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["hostprobe"])?;
    let config = ConfigFile {
        count: Some(0),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::FieldMustBePositive { field, .. })) if field == "count" => {
            Ok(())
        }
        Err(other) => Err(format!("Unexpected error: {}", other)),
        Ok(()) => Err("Expected zero count to be rejected".to_owned()),
    }
}

#[test]
fn config_rejects_invalid_durations() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["hostprobe"])?;
    let config = ConfigFile {
        timeout: Some(DurationValue::Text("10 parsecs".to_owned())),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::InvalidField { field, .. })) if field == "timeout" => {
            Ok(())
        }
        Err(other) => Err(format!("Unexpected error: {}", other)),
        Ok(()) => Err("Expected invalid duration to be rejected".to_owned()),
    }
}
