//! In-memory record store implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::feature::{RecordAttribute, RecordStore};
use crate::domain::DomainError;

/// A record as held by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub item_id: String,
    pub attributes: Vec<RecordAttribute>,
}

/// Thread-safe in-memory record store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    domains: RwLock<HashMap<String, Vec<StoredRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all created domains, sorted
    pub fn domains(&self) -> Vec<String> {
        let domains = self.domains.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = domains.keys().cloned().collect();
        names.sort();
        names
    }

    /// Records written to `domain`, in write order
    pub fn records(&self, domain: &str) -> Vec<StoredRecord> {
        let domains = self.domains.read().unwrap_or_else(|e| e.into_inner());
        domains.get(domain).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create_domain(&self, domain_name: &str) -> Result<(), DomainError> {
        let mut domains = self.domains.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        domains.entry(domain_name.to_string()).or_default();
        Ok(())
    }

    async fn put_record(
        &self,
        domain_name: &str,
        item_id: &str,
        attributes: Vec<RecordAttribute>,
    ) -> Result<(), DomainError> {
        let mut domains = self.domains.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let records = domains.get_mut(domain_name).ok_or_else(|| {
            DomainError::storage(format!("The specified domain does not exist: {}", domain_name))
        })?;

        records.push(StoredRecord {
            item_id: item_id.to_string(),
            attributes,
        });

        Ok(())
    }
}
