//! Feature usage and subscription notifiers

mod domain_guard;
mod recorder;
mod subscription;
mod usage;

pub use domain_guard::{DomainCreationPolicy, DomainGuard};
pub use subscription::SubscriptionNotifier;
pub use usage::UsageNotifier;
