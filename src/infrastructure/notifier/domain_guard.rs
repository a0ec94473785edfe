//! Lazy, once-per-instance domain creation

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::feature::RecordStore;
use crate::domain::DomainError;

/// When a notifier considers its domain created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainCreationPolicy {
    /// Marked created once the first attempt has been issued, even if it failed
    #[default]
    AttemptOnce,
    /// Marked created only after a successful attempt; failures retry on the next call
    UntilSuccess,
}

/// Tracks whether the notifier's domain has been created.
///
/// The lock is held across `create_domain`, so concurrent first calls issue a
/// single creation request and the rest wait for its outcome.
#[derive(Debug, Default)]
pub struct DomainGuard {
    policy: DomainCreationPolicy,
    created: Mutex<bool>,
}

impl DomainGuard {
    pub fn new(policy: DomainCreationPolicy) -> Self {
        Self {
            policy,
            created: Mutex::new(false),
        }
    }

    pub async fn is_created(&self) -> bool {
        *self.created.lock().await
    }

    /// Creates the domain unless this guard already considers it created
    pub async fn ensure(
        &self,
        store: &dyn RecordStore,
        domain_name: &str,
    ) -> Result<(), DomainError> {
        let mut created = self.created.lock().await;

        if *created {
            return Ok(());
        }

        debug!(domain = domain_name, "Creating domain");
        let result = store.create_domain(domain_name).await;

        *created = match self.policy {
            DomainCreationPolicy::AttemptOnce => true,
            DomainCreationPolicy::UntilSuccess => result.is_ok(),
        };

        result
    }
}
