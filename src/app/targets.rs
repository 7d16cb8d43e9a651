use std::path::Path;

use crate::args::{ProbeArgs, parse_host_list};
use crate::error::{AppError, AppResult, SourceError, ValidationError};

/// Resolves the host list from `--hosts` or `--file`, before deduplication.
pub(crate) fn load_targets(args: &ProbeArgs) -> AppResult<Vec<String>> {
    match (args.hosts.as_deref(), args.file.as_deref()) {
        (Some(_), Some(_)) => Err(AppError::validation(
            ValidationError::HostsAndFileConflict,
        )),
        (Some(list), None) => {
            let hosts = parse_host_list(list);
            if hosts.is_empty() {
                return Err(AppError::url_source(SourceError::HostListEmpty));
            }
            Ok(hosts)
        }
        (None, Some(path)) => read_host_file(Path::new(path)),
        (None, None) => Err(AppError::url_source(SourceError::MissingHosts)),
    }
}

/// One URL per line; blank lines and `#` comments are skipped.
fn read_host_file(path: &Path) -> AppResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::url_source(SourceError::ReadUrlFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let hosts: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect();
    if hosts.is_empty() {
        return Err(AppError::url_source(SourceError::UrlFileEmpty {
            path: path.to_path_buf(),
        }));
    }
    Ok(hosts)
}
