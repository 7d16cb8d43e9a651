use std::fmt::Write as _;
use std::time::Duration;

use crate::error::ReportError;

pub(super) fn write_line(output: &mut String, line: &str) -> Result<(), ReportError> {
    writeln!(output, "{}", line).map_err(|err| ReportError::WriteLine { source: err })
}

pub(super) fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

/// Seconds with millisecond precision, e.g. `0.105s`.
pub(super) fn format_seconds(value: Duration) -> String {
    let millis = value.as_millis();
    format!("{}.{:03}s", millis / 1000, millis % 1000)
}

pub(super) fn duration_micros(value: Duration) -> u64 {
    u64::try_from(value.as_micros()).unwrap_or(u64::MAX)
}
