//! Optional `tracing` subscriber for hosts that do not install their own.

use tracing_subscriber::EnvFilter;

use crate::error::{Gw2tpError, Result};

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_directive` (e.g.
/// `"gw2tp_addon=info"`) is used. Fails if a global subscriber is already
/// set.
pub fn init(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| Gw2tpError::InvalidArgument(format!("Bad log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Gw2tpError::InvalidArgument(format!("Logging already initialized: {e}")))
}
