//! Shared test helpers

use tracing_subscriber::{fmt, EnvFilter};

/// Route library logs to the test writer (RUST_LOG controls the level)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}
