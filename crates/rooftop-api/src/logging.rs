//! Tracing setup shared by the binaries.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "rooftop_api=info,rooftop_vision=info,rooftop_models=info";

/// Initialize tracing with colored output for dev, JSON for production.
///
/// `LOG_FORMAT=json` selects JSON lines. `RUST_LOG` refines the filter.
pub fn init_tracing() {
    init_with_writer(std::io::stdout);
}

/// Same as [`init_tracing`], writing to stderr so stdout carries only the
/// CLI report.
pub fn init_cli_tracing() {
    init_with_writer(std::io::stderr);
}

fn init_with_writer<W>(writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(writer))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
