//! Record store factory for runtime backend selection

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::domain::feature::RecordStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryRecordStore;
use super::simpledb::{SimpleDbConfig, SimpleDbRecordStore};

/// Supported record store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory store (for testing/development)
    InMemory,
    /// Amazon SimpleDB
    SimpleDb,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "simpledb" | "simple-db" | "sdb" => Some(Self::SimpleDb),
            _ => None,
        }
    }
}

/// Factory for creating record store instances
#[derive(Debug)]
pub struct RecordStoreFactory;

impl RecordStoreFactory {
    /// Creates the record store named by `store.backend`
    pub async fn create(
        store: &StoreConfig,
        simpledb: &SimpleDbConfig,
    ) -> Result<Arc<dyn RecordStore>, DomainError> {
        let backend = StoreBackend::from_str(&store.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown store backend: {}", store.backend))
        })?;

        match backend {
            StoreBackend::InMemory => Ok(Arc::new(InMemoryRecordStore::new())),
            StoreBackend::SimpleDb => Ok(Arc::new(SimpleDbRecordStore::new(simpledb).await)),
        }
    }
}
