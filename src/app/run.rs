use std::io::{IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::args::ProbeArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{ClientSettings, HttpTransport, build_client};
use crate::probe::{DispatchSettings, Dispatcher};
use crate::report::{Report, write_report_file};
use crate::shutdown::{
    setup_run_timeout_handler, setup_signal_shutdown_handler, shutdown_channel,
};

use super::load_targets;

/// Probes every configured host and prints the report.
///
/// The report is printed even when the run is interrupted; the interruption
/// is then returned as an error so the process exits non-zero.
pub(crate) async fn run_probe(args: &ProbeArgs) -> AppResult<()> {
    let hosts = load_targets(args)?;

    let client = build_client(&ClientSettings {
        request_timeout: args.request_timeout,
        connect_timeout: args.connect_timeout,
        redirect_limit: args.redirect_limit,
    })?;
    let dispatcher = Dispatcher::new(
        Arc::new(HttpTransport::new(client)),
        DispatchSettings {
            count: args.count,
            max_in_flight: args.parallel,
            per_host_limit: args.per_host,
            request_timeout: args.request_timeout,
            policy: args.success_status.clone(),
        },
    )?;

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let deadline_handle = args
        .run_timeout
        .map(|limit| setup_run_timeout_handler(&shutdown_tx, limit));

    let results = dispatcher.run(&hosts, shutdown_rx).await;
    let interrupted = results.was_cancelled();
    signal_handle.abort();
    if let Some(handle) = deadline_handle {
        handle.abort();
    }

    let mut report = Report::new(
        results.summarize()?,
        args.count.get(),
        results.elapsed(),
        interrupted,
    );
    report.sort(args.sort);

    let color = !args.no_color && std::io::stdout().is_terminal();
    let rendered = report.render(args.format, color)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if let Some(path) = args.output.as_deref() {
        let plain = if color {
            report.render(args.format, false)?
        } else {
            rendered
        };
        write_report_file(Path::new(path), &plain)?;
        info!("Report written to {}", path);
    }

    if interrupted {
        return Err(AppError::validation(ValidationError::Interrupted));
    }
    Ok(())
}
