//! Logging setup shared by Whippet binaries and tests.

/// Tracing subscriber configuration.
pub mod tracing;

pub use crate::tracing::{LogFormat, LogSettings};

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(settings: &LogSettings) -> bool {
    crate::tracing::init(settings)
}

/// Initialize with defaults (`info`, JSON).
pub fn init_default() -> bool {
    init(&LogSettings::default())
}
