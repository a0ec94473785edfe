//! Record store implementations

mod factory;
mod in_memory;
mod simpledb;

pub use factory::{RecordStoreFactory, StoreBackend};
pub use in_memory::{InMemoryRecordStore, StoredRecord};
pub use simpledb::{SimpleDbConfig, SimpleDbRecordStore};
