//! Tracing setup for the gateway binary
//!
//! - Console: colored, compact
//! - File (optional): daily rotation, `mcpconn.YYYY-MM-DD.log`

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_PREFIX: &str = "mcpconn";

/// Default filter when `RUST_LOG` is not set.
pub fn default_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::new("info")
        .add_directive("mcpconn_core=debug".parse()?)
        .add_directive("mcpconn_storage=debug".parse()?)
        .add_directive("mcpconn_gateway=debug".parse()?)
        .add_directive("tower_http=info".parse()?)
        .add_directive("hyper=warn".parse()?))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer and must be held for the
/// lifetime of the process.
pub fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter()?,
    };

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_PREFIX)
                .filename_suffix("log")
                .build(dir)
                .context("Failed to create log file appender")?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
