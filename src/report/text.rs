use crossterm::style::Stylize;

use crate::error::ReportError;
use crate::metrics::HostSummary;

use super::Report;
use super::format::{format_seconds, format_x100, write_line};

const FULL_RATE_X100: u64 = 10_000;
const WARN_RATE_X100: u64 = 8_000;

pub(super) fn render(report: &Report, color: bool) -> Result<String, ReportError> {
    let mut output = String::new();
    write_line(
        &mut output,
        &format!(
            "hostprobe report {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S %:z")
        ),
    )?;
    write_line(
        &mut output,
        &format!("Requests per host: {}", report.count),
    )?;

    for (idx, summary) in report.hosts.iter().enumerate() {
        write_line(&mut output, "")?;
        write_host(&mut output, idx.saturating_add(1), summary, color)?;
    }

    write_line(&mut output, "")?;
    write_line(
        &mut output,
        &format!(
            "Probed {} host(s) in {}",
            report.hosts.len(),
            format_seconds(report.elapsed)
        ),
    )?;
    if report.interrupted {
        let notice = "Run interrupted: unfinished requests were cancelled.";
        if color {
            write_line(&mut output, &notice.yellow().to_string())?;
        } else {
            write_line(&mut output, notice)?;
        }
    }
    Ok(output)
}

fn write_host(
    output: &mut String,
    position: usize,
    summary: &HostSummary,
    color: bool,
) -> Result<(), ReportError> {
    let heading = format!("#{} {}", position, summary.host);
    if color {
        write_line(output, &heading.bold().to_string())?;
    } else {
        write_line(output, &heading)?;
    }

    let rate_x100 = summary.success_rate_x100();
    let ratio = format!(
        "{}/{} ({}%)",
        summary.success_count,
        summary.total(),
        format_x100(rate_x100)
    );
    let ratio = if !color {
        ratio
    } else if rate_x100 >= FULL_RATE_X100 {
        ratio.green().to_string()
    } else if rate_x100 >= WARN_RATE_X100 {
        ratio.yellow().to_string()
    } else {
        ratio.red().to_string()
    };
    write_line(output, &format!("  Success:           {}", ratio))?;
    write_line(
        output,
        &format!("  Server errors:     {}", summary.server_error_count),
    )?;
    write_line(
        output,
        &format!("  Connection errors: {}", summary.connection_error_count),
    )?;

    match summary.latency {
        Some(latency) => write_line(
            output,
            &format!(
                "  Latency:           min {} / max {} / avg {} / σ {} / p50 {} / p90 {} / p99 {}",
                format_seconds(latency.min),
                format_seconds(latency.max),
                format_seconds(latency.avg),
                format_seconds(latency.std_dev),
                format_seconds(latency.p50),
                format_seconds(latency.p90),
                format_seconds(latency.p99),
            ),
        )?,
        None => write_line(output, "  Latency:           n/a")?,
    }

    let failures = failure_breakdown(summary);
    if !failures.is_empty() {
        write_line(output, &format!("  Failures:          {}", failures))?;
    }
    Ok(())
}

fn failure_breakdown(summary: &HostSummary) -> String {
    summary
        .status_counts
        .iter()
        .map(|(status, count)| format!("{} x{}", status, count))
        .chain(
            summary
                .connection_errors
                .iter()
                .map(|(kind, count)| format!("{} x{}", kind.as_str(), count)),
        )
        .collect::<Vec<_>>()
        .join(", ")
}
