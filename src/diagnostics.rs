//! Diagnostic output of the transaction layer.

use log::{info, warn};

/// Best-effort sink for operator-facing diagnostics.
///
/// Implementations must not block and must never fail.
pub trait DiagnosticSink: Send + Sync {
    /// Non-fatal protocol anomaly
    fn warning(&self, message: &str);

    /// Informational note, e.g. the identity reported by the device
    fn info(&self, _message: &str) {}
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warning(&self, message: &str) {
        warn!("{}", message);
    }

    fn info(&self, message: &str) {
        info!("{}", message);
    }
}
