//! Amazon SimpleDB record store

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_simpledb::error::DisplayErrorContext;
use aws_sdk_simpledb::types::ReplaceableAttribute;
use aws_sdk_simpledb::Client as SimpleDbClient;
use serde::Deserialize;
use tracing::debug;

use crate::domain::feature::{RecordAttribute, RecordStore};
use crate::domain::DomainError;

/// Connection settings for SimpleDB
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimpleDbConfig {
    /// AWS region, falls back to the default provider chain when unset
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override, e.g. `https://sdb.eu-west-1.amazonaws.com`
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Record store backed by Amazon SimpleDB domains
pub struct SimpleDbRecordStore {
    client: SimpleDbClient,
}

impl Debug for SimpleDbRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleDbRecordStore").finish_non_exhaustive()
    }
}

impl SimpleDbRecordStore {
    /// Create a store using the default AWS credential chain
    pub async fn new(config: &SimpleDbConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        // A notification is a single write attempt; failures surface to the caller.
        let sdk_config = loader
            .retry_config(aws_config::retry::RetryConfig::disabled())
            .load()
            .await;

        Self::with_client(SimpleDbClient::new(&sdk_config))
    }

    pub fn with_client(client: SimpleDbClient) -> Self {
        Self { client }
    }

    fn to_replaceable(attribute: RecordAttribute) -> Result<ReplaceableAttribute, DomainError> {
        ReplaceableAttribute::builder()
            .name(attribute.name)
            .value(attribute.value)
            .build()
            .map_err(|e| DomainError::storage(format!("Invalid SimpleDB attribute: {}", e)))
    }
}

#[async_trait]
impl RecordStore for SimpleDbRecordStore {
    async fn create_domain(&self, domain_name: &str) -> Result<(), DomainError> {
        self.client
            .create_domain()
            .domain_name(domain_name)
            .send()
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "SimpleDB CreateDomain failed for '{}': {}",
                    domain_name,
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(domain = domain_name, "SimpleDB domain ready");
        Ok(())
    }

    async fn put_record(
        &self,
        domain_name: &str,
        item_id: &str,
        attributes: Vec<RecordAttribute>,
    ) -> Result<(), DomainError> {
        let attributes = attributes
            .into_iter()
            .map(Self::to_replaceable)
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .put_attributes()
            .domain_name(domain_name)
            .item_name(item_id)
            .set_attributes(Some(attributes))
            .send()
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "SimpleDB PutAttributes failed for '{}/{}': {}",
                    domain_name,
                    item_id,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(())
    }
}
