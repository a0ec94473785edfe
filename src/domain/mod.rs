//! Domain layer - Feature events and the capabilities they are recorded through

pub mod error;
pub mod feature;

pub use error::DomainError;
pub use feature::{
    FailureSink, FeatureSubscriptionService, FeatureUsageService, RecordAttribute, RecordStore,
    SubscriptionEvent, UsageEvent,
};
