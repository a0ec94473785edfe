//! Record store capability

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::event::RecordAttribute;
use crate::domain::DomainError;

/// Remote key-attribute store the notifiers write events into
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates the domain (table). Creating an existing domain is not an error.
    async fn create_domain(&self, domain_name: &str) -> Result<(), DomainError>;

    /// Writes one record keyed by `item_id`
    async fn put_record(
        &self,
        domain_name: &str,
        item_id: &str,
        attributes: Vec<RecordAttribute>,
    ) -> Result<(), DomainError>;
}
