//! Console logging setup.
//!
//! Logs go to stderr so they never mix with program output on stdout.
//! `RUST_LOG` overrides the default `warn` level; `debug` shows every stop,
//! `trace` every executed instruction.

use std::io;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Later calls do nothing.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "debug" } else { "warn" };
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    });
}
