use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
///
/// The returned guard flushes the file writer when dropped, so callers keep
/// it alive for the duration of `main`.
pub fn init_logging(log_dir: &Path, verbose: bool) -> Option<WorkerGuard> {
    let default_directive = if verbose {
        "ifc_icons=debug"
    } else {
        "ifc_icons=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Without a writable log directory we still want console output
    let (file_layer, guard) = if fs::create_dir_all(log_dir).is_ok() {
        // Daily rotated JSON log file next to the console output
        let file_appender = tracing_appender::rolling::daily(log_dir, "ifc_icons.log");
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer().json().with_writer(non_blocking_writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
