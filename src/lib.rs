//! Feature Metrics
//!
//! Records "feature used" and "feature subscribed" events into a remote
//! key-attribute store:
//! - Lazy, once-per-instance creation of the backing domain
//! - Throwing, error-swallowing and fire-and-forget notification variants
//! - Amazon SimpleDB and in-memory record stores

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    DomainError, FailureSink, FeatureSubscriptionService, FeatureUsageService, RecordStore,
    SubscriptionEvent, UsageEvent,
};
pub use infrastructure::notifier::{DomainCreationPolicy, SubscriptionNotifier, UsageNotifier};
