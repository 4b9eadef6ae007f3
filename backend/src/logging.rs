//! Logging setup and diagnostic output.
//!
//! The library never logs on its own. Binaries call [`init_logging`] once and
//! decide whether to pass loader diagnostics to [`log_diagnostics`].
//!
//! `RUST_LOG` takes precedence over the verbosity count.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::catalog::Diagnostic;

/// Map a `-v` count to a level: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr subscriber. Calling it twice is harmless.
pub fn init_logging(verbosity: u8) {
    let default_level = level_from_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Emit one `warn` event per diagnostic.
pub fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::UnreadableDirectory { dir, reason } => {
                tracing::warn!(dir = %dir, reason = %reason, "{}", diagnostic);
            }
            Diagnostic::SkippedFile { file, reason } => {
                tracing::warn!(file = %file, reason = %reason, "{}", diagnostic);
            }
            Diagnostic::OmittedFee { airline, index, reason } => {
                tracing::warn!(airline = %airline, index, reason = reason.code(), "{}", diagnostic);
            }
        }
    }
}
