//! Infrastructure layer - Notifier and record store implementations

pub mod logging;
pub mod notifier;
pub mod store;
