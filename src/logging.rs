//! Tracing bootstrap for embedding applications and test binaries.

use std::sync::OnceLock;

use tracing::Level;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global fmt subscriber once. `verbose` drops the filter to
/// `TRACE` so individual state transitions show up.
pub fn init_logging(verbose: bool) {
    INIT.get_or_init(|| {
        let level = if verbose { Level::TRACE } else { Level::DEBUG };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init();
    });
}
