//! Feature notification service traits

use async_trait::async_trait;

use super::event::{SubscriptionEvent, UsageEvent};
use crate::domain::DomainError;

/// Records that a feature has been used
#[async_trait]
pub trait FeatureUsageService: Send + Sync {
    /// Records the usage. Any failure is returned to the caller.
    async fn notify_usage(&self, event: UsageEvent) -> Result<(), DomainError>;

    /// Records the usage. A failure is handed to the failure sink instead of returned.
    async fn notify_usage_safe(&self, event: UsageEvent);

    /// Records the usage on a background task and returns immediately.
    /// Failures are only visible through the failure sink.
    fn notify_usage_in_background(&self, event: UsageEvent);
}

/// Records who subscribes to a feature
#[async_trait]
pub trait FeatureSubscriptionService: Send + Sync {
    /// Records the subscription. Any failure is returned to the caller.
    async fn notify_subscription(&self, event: SubscriptionEvent) -> Result<(), DomainError>;

    /// Records the subscription. A failure is handed to the failure sink instead of returned.
    async fn notify_subscription_safe(&self, event: SubscriptionEvent);

    /// Records the subscription on a background task and returns immediately.
    /// Failures are only visible through the failure sink.
    fn notify_subscription_in_background(&self, event: SubscriptionEvent);
}
