//! Failure sinks for errors swallowed by the safe notification variants

use crate::domain::DomainError;

/// Receives errors the safe and background notification variants do not propagate.
///
/// Called from whichever task ran the notification, so implementations must be
/// thread-safe and must not panic.
pub trait FailureSink: Send + Sync {
    fn on_failure(&self, error: DomainError);
}

impl<F> FailureSink for F
where
    F: Fn(DomainError) + Send + Sync,
{
    fn on_failure(&self, error: DomainError) {
        self(error)
    }
}

/// Failure sink that logs each error
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFailureSink;

impl FailureSink for LogFailureSink {
    fn on_failure(&self, error: DomainError) {
        tracing::warn!(error = %error, "Feature notification failed");
    }
}
