use super::load_targets;
use crate::args::ProbeArgs;
use crate::error::{AppError, AppResult, SourceError, ValidationError};
use clap::Parser;
use tempfile::tempdir;

fn parse(args: &[&str]) -> AppResult<ProbeArgs> {
    ProbeArgs::try_parse_from(args).map_err(AppError::from)
}

#[test]
fn host_list_is_trimmed_and_filtered() -> AppResult<()> {
    let mut args = parse(&["hostprobe"])?;
    args.hosts = Some(" https://a.test ,, https://b.test,".to_owned());
    let hosts = load_targets(&args)?;
    if hosts != ["https://a.test", "https://b.test"] {
        return Err(AppError::validation(format!("Unexpected hosts: {:?}", hosts)));
    }
    Ok(())
}

#[test]
fn host_file_skips_blanks_and_comments() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("hosts.txt");
    std::fs::write(
        &path,
        "# production\nhttps://a.test\n\n   \n  https://b.test  \n#https://skipped.test\nhttps://a.test\n",
    )?;
    let mut args = parse(&["hostprobe"])?;
    args.file = Some(path.display().to_string());

    let hosts = load_targets(&args)?;
    if hosts != ["https://a.test", "https://b.test", "https://a.test"] {
        return Err(AppError::validation(format!("Unexpected hosts: {:?}", hosts)));
    }
    Ok(())
}

#[test]
fn empty_host_file_is_an_error() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("hosts.txt");
    std::fs::write(&path, "# nothing here\n\n")?;
    let mut args = parse(&["hostprobe"])?;
    args.file = Some(path.display().to_string());

    match load_targets(&args) {
        Err(AppError::Source(SourceError::UrlFileEmpty { .. })) => Ok(()),
        Err(other) => Err(AppError::validation(format!("Unexpected error: {}", other))),
        Ok(hosts) => Err(AppError::validation(format!("Expected error, got {:?}", hosts))),
    }
}

#[test]
fn missing_host_file_is_an_error() -> AppResult<()> {
    let dir = tempdir()?;
    let mut args = parse(&["hostprobe"])?;
    args.file = Some(dir.path().join("absent.txt").display().to_string());

    match load_targets(&args) {
        Err(AppError::Source(SourceError::ReadUrlFile { .. })) => Ok(()),
        Err(other) => Err(AppError::validation(format!("Unexpected error: {}", other))),
        Ok(hosts) => Err(AppError::validation(format!("Expected error, got {:?}", hosts))),
    }
}

#[test]
fn missing_targets_are_reported() -> AppResult<()> {
    let args = parse(&["hostprobe"])?;
    match load_targets(&args) {
        Err(AppError::Source(SourceError::MissingHosts)) => Ok(()),
        Err(other) => Err(AppError::validation(format!("Unexpected error: {}", other))),
        Ok(hosts) => Err(AppError::validation(format!("Expected error, got {:?}", hosts))),
    }
}

#[test]
fn blank_host_list_is_an_error() -> AppResult<()> {
    let mut args = parse(&["hostprobe"])?;
    args.hosts = Some(" , ,".to_owned());
    match load_targets(&args) {
        Err(AppError::Source(SourceError::HostListEmpty)) => Ok(()),
        Err(other) => Err(AppError::validation(format!("Unexpected error: {}", other))),
        Ok(hosts) => Err(AppError::validation(format!("Expected error, got {:?}", hosts))),
    }
}

#[test]
fn hosts_and_file_from_config_conflict() -> AppResult<()> {
    let mut args = parse(&["hostprobe"])?;
    args.hosts = Some("https://a.test".to_owned());
    args.file = Some("hosts.txt".to_owned());
    match load_targets(&args) {
        Err(AppError::Validation(ValidationError::HostsAndFileConflict)) => Ok(()),
        Err(other) => Err(AppError::validation(format!("Unexpected error: {}", other))),
        Ok(hosts) => Err(AppError::validation(format!("Expected error, got {:?}", hosts))),
    }
}
