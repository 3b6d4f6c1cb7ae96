use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, ToolError};

/// Default filter directive for the given `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "sheet_probe=warn",
        1 => "sheet_probe=info",
        _ => "sheet_probe=debug,info",
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flag.
///
/// Logs go to stderr; stdout carries the report only.
pub fn init(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}
