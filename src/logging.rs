//! Logging setup
//!
//! Diagnostics go to stderr through a global tracing subscriber so that
//! stdout stays reserved for results (text, JSON or diff).

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_TEST_LOGGING: Once = Once::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber.
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(String),
}

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "sbtup=debug"
    } else {
        "sbtup=warn"
    }
}

/// Initialize tracing for the CLI.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects debug output.
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| LoggingError::SetGlobal(e.to_string()))
}

/// Initialize logging for tests, once per process.
///
/// Output is captured by the test harness and shown only for failing tests.
pub fn init_test_logging() {
    INIT_TEST_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(true)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
