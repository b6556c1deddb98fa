//! Tracing/logging setup shared by dutydesk binaries.

/// Tracing configuration (filters, formatting).
pub mod tracing;

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init("info");
}
