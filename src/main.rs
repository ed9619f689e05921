//! Plugboard - deployment-time service location
//!
//! Main entry point: selects a configuration, loads the modules it lists and
//! runs the named application.

mod cli;
mod host;

use std::path::Path;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use plugboard_core::Builder;

use crate::cli::Cli;
use crate::host::HostOptions;

/// Initialize tracing with console output and, when `log_dir` is given,
/// daily rotated log files.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing(log_level: Option<&str>, log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("plugboard")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let guard = init_tracing(cli.log_level.as_deref(), cli.log_dir.as_deref())?;

    tracing::info!("Starting Plugboard v{}", env!("CARGO_PKG_VERSION"));

    let options = HostOptions {
        file: cli.file,
        section: cli.section,
        application: cli.application,
        args: cli.args,
    };
    let status = host::run(&Builder::new(), &options);

    drop(guard);
    std::process::exit(status);
}
