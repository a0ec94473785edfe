//! Feature usage and subscription events

pub mod event;
pub mod failure;
pub mod service;
pub mod store;

pub use event::{
    attribute_value, ItemId, RecordAttribute, SubscriptionEvent, UsageEvent,
    SUBSCRIPTION_ATTRIBUTES, USAGE_ATTRIBUTES,
};
pub use failure::{FailureSink, LogFailureSink};
pub use service::{FeatureSubscriptionService, FeatureUsageService};
pub use store::RecordStore;

#[cfg(test)]
pub use store::MockRecordStore;
