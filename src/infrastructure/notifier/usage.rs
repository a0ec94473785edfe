//! Feature usage notifier

use std::sync::Arc;

use async_trait::async_trait;

use super::domain_guard::DomainCreationPolicy;
use super::recorder::EventRecorder;
use crate::domain::feature::{FailureSink, FeatureUsageService, RecordStore, UsageEvent};
use crate::domain::DomainError;

/// Records feature usage events into a record store domain.
///
/// Cloning is cheap and clones share the same domain-creation state.
#[derive(Debug, Clone)]
pub struct UsageNotifier {
    inner: Arc<EventRecorder>,
}

impl UsageNotifier {
    /// Create a notifier writing into `domain_name`
    ///
    /// `on_failure` receives errors swallowed by the safe and background variants.
    pub fn new(
        on_failure: impl FailureSink + 'static,
        domain_name: impl Into<String>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self::with_domain_creation(on_failure, domain_name, store, DomainCreationPolicy::default())
    }

    /// Create a notifier with an explicit domain creation policy
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
impl FeatureUsageService for UsageNotifier {
    async fn notify_usage(&self, event: UsageEvent) -> Result<(), DomainError> {
        self.inner.record(|now| event.attributes(now)).await
    }

    async fn notify_usage_safe(&self, event: UsageEvent) {
        if let Err(e) = self.notify_usage(event).await {
            self.inner.report(e);
        }
    }

    fn notify_usage_in_background(&self, event: UsageEvent) {
        let notifier = self.clone();

        self.inner.spawn(async move {
            notifier.notify_usage_safe(event).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature::{attribute_value, MockRecordStore};
    use crate::infrastructure::store::InMemoryRecordStore;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    type Captured = Arc<Mutex<Vec<DomainError>>>;

    fn capturing_sink() -> (Captured, impl Fn(DomainError) + Send + Sync + 'static) {
        let errors: Captured = Arc::new(Mutex::new(Vec::new()));
        let captured = errors.clone();
        (errors, move |error: DomainError| {
            captured.lock().unwrap().push(error)
        })
    }

    fn usage_event() -> UsageEvent {
        UsageEvent::new("App1", "Feat1")
            .with_details("details")
            .with_used_by("user1")
    }

    #[tokio::test]
    async fn test_notify_usage_creates_domain_and_writes_record() {
        let mut store = MockRecordStore::new();
        store
            .expect_create_domain()
            .withf(|domain| domain == "Domain1")
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_put_record()
            .withf(|domain, item_id, attributes| {
                domain == "Domain1"
                    && !item_id.is_empty()
                    && attributes.len() == 5
                    && attribute_value(attributes, "application") == Some("App1")
                    && attribute_value(attributes, "feature") == Some("Feat1")
                    && attribute_value(attributes, "detail") == Some("details")
                    && attribute_value(attributes, "usedBy") == Some("user1")
                    && attribute_value(attributes, "usedAt").is_some_and(|v| !v.is_empty())
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let (errors, sink) = capturing_sink();
        let notifier = UsageNotifier::new(sink, "Domain1", Arc::new(store));

        tokio_test::assert_ok!(notifier.notify_usage(usage_event()).await);
        assert!(errors.lock().unwrap().is_empty());
        assert!(notifier.is_domain_created().await);
    }

    #[tokio::test]
    async fn test_domain_is_created_only_on_first_call() {
        let item_ids = Arc::new(Mutex::new(Vec::new()));
        let seen = item_ids.clone();

        let mut store = MockRecordStore::new();
        store
            .expect_create_domain()
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_put_record()
            .times(3)
            .returning(move |_, item_id, _| {
                seen.lock().unwrap().push(item_id.to_string());
                Ok(())
            });

        let (_, sink) = capturing_sink();
        let notifier = UsageNotifier::new(sink, "Domain1", Arc::new(store));

        for _ in 0..3 {
            notifier.notify_usage(usage_event()).await.unwrap();
        }

        let mut ids = item_ids.lock().unwrap().clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_notify_usage_propagates_write_error() {
        let mut store = MockRecordStore::new();
        store.expect_create_domain().returning(|_| Ok(()));
        store
            .expect_put_record()
            .returning(|_, _, _| Err(DomainError::storage("Something really bad happened")));

        let (errors, sink) = capturing_sink();
        let notifier = UsageNotifier::new(sink, "Domain1", Arc::new(store));

        let result = notifier.notify_usage(usage_event()).await;

        assert_eq!(
            result,
            Err(DomainError::storage("Something really bad happened"))
        );
        assert!(errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notify_usage_safe_hands_write_error_to_sink_once() {
        let mut store = MockRecordStore::new();
        store.expect_create_domain().returning(|_| Ok(()));
        store
            .expect_put_record()
            .returning(|_, _, _| Err(DomainError::storage("Something really bad happened")));

        let (errors, sink) = capturing_sink();
        let notifier = UsageNotifier::new(sink, "Domain1", Arc::new(store));

        notifier.notify_usage_safe(usage_event()).await;

        assert_eq!(
            *errors.lock().unwrap(),
            vec![DomainError::storage("Something really bad happened")]
        );
    }

    #[tokio::test]
    async fn test_failed_domain_creation_is_not_retried() {
        let mut store = MockRecordStore::new();
        store
            .expect_create_domain()
            .times(1)
            .returning(|_| Err(DomainError::storage("Something really bad happened")));
        store
            .expect_put_record()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let (errors, sink) = capturing_sink();
        let notifier = UsageNotifier::new(sink, "Domain1", Arc::new(store));

        notifier.notify_usage_safe(usage_event()).await;
        assert_eq!(
            *errors.lock().unwrap(),
            vec![DomainError::storage("Something really bad happened")]
        );
        assert!(notifier.is_domain_created().await);

        notifier.notify_usage_safe(usage_event()).await;
        assert_eq!(errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_until_success_policy_retries_domain_creation() {
        let mut store = MockRecordStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_create_domain()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(DomainError::storage("throttled")));
        store
            .expect_create_domain()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_put_record()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let (errors, sink) = capturing_sink();
        let notifier = UsageNotifier::with_domain_creation(
            sink,
            "Domain1",
            Arc::new(store),
            DomainCreationPolicy::UntilSuccess,
        );

        notifier.notify_usage_safe(usage_event()).await;
        notifier.notify_usage_safe(usage_event()).await;

        assert_eq!(
            *errors.lock().unwrap(),
            vec![DomainError::storage("throttled")]
        );
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_create_domain_once() {
        let mut store = MockRecordStore::new();
        store
            .expect_create_domain()
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_put_record()
            .times(8)
            .returning(|_, _, _| Ok(()));

        let (_, sink) = capturing_sink();
        let notifier = UsageNotifier::new(sink, "Domain1", Arc::new(store));

        let calls = (0..8).map(|_| {
            let notifier = notifier.clone();
            tokio::spawn(async move { notifier.notify_usage(usage_event()).await })
        });

        for result in futures::future::join_all(calls).await {
            assert!(result.unwrap().is_ok());
        }
    }

    #[tokio::test]
    async fn test_background_notification_writes_record() {
        let store = Arc::new(InMemoryRecordStore::new());
        let (errors, sink) = capturing_sink();
        let notifier = UsageNotifier::new(sink, "Domain1", store.clone());

        notifier.notify_usage_in_background(usage_event());

        let written = tokio::time::timeout(Duration::from_secs(5), async {
            while store.records("Domain1").is_empty() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;

        assert!(written.is_ok());
        let record = &store.records("Domain1")[0];
        assert_eq!(attribute_value(&record.attributes, "feature"), Some("Feat1"));
        assert!(errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_background_failure_reaches_sink() {
        let mut store = MockRecordStore::new();
        store
            .expect_create_domain()
            .returning(|_| Err(DomainError::storage("Something really bad happened")));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = UsageNotifier::new(
            move |error| {
                let _ = tx.send(error);
            },
            "Domain1",
            Arc::new(store),
        );

        notifier.notify_usage_in_background(usage_event());

        let error = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert_eq!(
            error,
            Some(DomainError::storage("Something really bad happened"))
        );
    }

    #[test]
    fn test_background_without_runtime_reports_failure() {
        let store = MockRecordStore::new();
        let (errors, sink) = capturing_sink();
        let notifier = UsageNotifier::new(sink, "Domain1", Arc::new(store));

        notifier.notify_usage_in_background(usage_event());

        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], DomainError::Runtime { .. }));
    }
}
