//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogFormat;

/// Installs a global subscriber. `RUST_LOG` wins when set; otherwise `info`.
///
/// Safe to call more than once: later calls are no-ops.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(false);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
