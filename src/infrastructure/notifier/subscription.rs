//! Feature subscription notifier

use std::sync::Arc;

use async_trait::async_trait;

use super::domain_guard::DomainCreationPolicy;
use super::recorder::EventRecorder;
use crate::domain::feature::{
    FailureSink, FeatureSubscriptionService, RecordStore, SubscriptionEvent,
};
use crate::domain::DomainError;

/// Records feature subscription events into a record store domain.
///
/// Cloning is cheap and clones share the same domain-creation state.
#[derive(Debug, Clone)]
pub struct SubscriptionNotifier {
    inner: Arc<EventRecorder>,
}

impl SubscriptionNotifier {
    pub fn new(
        on_failure: impl FailureSink + 'static,
        domain_name: impl Into<String>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self::with_domain_creation(on_failure, domain_name, store, DomainCreationPolicy::default())
    }

    pub fn with_domain_creation(
        on_failure: impl FailureSink + 'static,
        domain_name: impl Into<String>,
        store: Arc<dyn RecordStore>,
        policy: DomainCreationPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(EventRecorder::new(
                Arc::new(on_failure),
                domain_name.into(),
                store,
                policy,
            )),
        }
    }

    pub async fn is_domain_created(&self) -> bool {
        self.inner.is_domain_created().await
    }
}

#[async_trait]
impl FeatureSubscriptionService for SubscriptionNotifier {
    async fn notify_subscription(&self, event: SubscriptionEvent) -> Result<(), DomainError> {
        self.inner.record(|now| event.attributes(now)).await
    }

    async fn notify_subscription_safe(&self, event: SubscriptionEvent) {
        if let Err(e) = self.notify_subscription(event).await {
            self.inner.report(e);
        }
    }

    fn notify_subscription_in_background(&self, event: SubscriptionEvent) {
        let notifier = self.clone();

        self.inner.spawn(async move {
            notifier.notify_subscription_safe(event).await;
        });
    }
}
