//! Process-wide logger setup

use env_logger::{Builder, Env};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the logger once; later calls are no-ops.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn setup_log() {
    INIT.call_once(|| {
        Builder::from_env(Env::default().default_filter_or("info")).init();
    });
}
