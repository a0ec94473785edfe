//! Shared write path of the feature notifiers

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::runtime::Handle;
use tracing::debug;

use super::domain_guard::{DomainCreationPolicy, DomainGuard};
use crate::domain::feature::{FailureSink, ItemId, RecordAttribute, RecordStore};
use crate::domain::DomainError;

/// Writes event records into one domain of a record store
pub(crate) struct EventRecorder {
    domain_name: String,
    store: Arc<dyn RecordStore>,
    on_failure: Arc<dyn FailureSink>,
    guard: DomainGuard,
}

impl EventRecorder {
    pub(crate) fn new(
        on_failure: Arc<dyn FailureSink>,
        domain_name: String,
        store: Arc<dyn RecordStore>,
        policy: DomainCreationPolicy,
    ) -> Self {
        Self {
            domain_name,
            store,
            on_failure,
            guard: DomainGuard::new(policy),
        }
    }

    pub(crate) async fn is_domain_created(&self) -> bool {
        self.guard.is_created().await
    }

    /// Ensures the domain exists, then writes one record under a fresh item ID
    pub(crate) async fn record<F>(&self, attributes: F) -> Result<(), DomainError>
    where
        F: FnOnce(chrono::DateTime<Utc>) -> Vec<RecordAttribute>,
    {
        self.guard
            .ensure(self.store.as_ref(), &self.domain_name)
            .await?;

        let item_id = ItemId::generate();
        let attributes = attributes(Utc::now());

        debug!(
            domain = %self.domain_name,
            item_id = %item_id,
            "Writing feature record"
        );

        self.store
            .put_record(&self.domain_name, item_id.as_str(), attributes)
            .await
    }

    pub(crate) fn report(&self, error: DomainError) {
        self.on_failure.on_failure(error);
    }

    /// Runs `task` on the current tokio runtime without waiting for it
    pub(crate) fn spawn<T>(&self, task: T)
    where
        T: Future<Output = ()> + Send + 'static,
    {
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(e) => self.report(DomainError::runtime(format!(
                "No async runtime available for background notification: {}",
                e
            ))),
        }
    }
}

impl std::fmt::Debug for EventRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRecorder")
            .field("domain_name", &self.domain_name)
            .field("guard", &self.guard)
            .finish()
    }
}
