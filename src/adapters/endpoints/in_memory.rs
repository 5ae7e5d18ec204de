//! In-memory endpoint store for testing and development.
//!
//! Not suitable for production: endpoints vanish with the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::endpoint::Endpoint;
use crate::domain::foundation::{DomainError, EndpointId, UserId};
use crate::ports::EndpointStore;

/// In-memory endpoint store backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryEndpointStore {
    endpoints: RwLock<HashMap<EndpointId, Endpoint>>,
}

impl InMemoryEndpointStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EndpointStore for InMemoryEndpointStore {
    async fn create(&self, endpoint: &Endpoint) -> Result<(), DomainError> {
        self.endpoints
            .write()
            .await
            .insert(endpoint.id(), endpoint.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: EndpointId) -> Result<Option<Endpoint>, DomainError> {
        Ok(self.endpoints.read().await.get(&id).cloned())
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<Endpoint>, DomainError> {
        let mut owned: Vec<Endpoint> = self
            .endpoints
            .read()
            .await
            .values()
            .filter(|e| e.owner_id() == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(owned)
    }

    async fn delete(&self, owner_id: &UserId, id: EndpointId) -> Result<bool, DomainError> {
        let mut endpoints = self.endpoints.write().await;
        match endpoints.get(&id) {
            Some(endpoint) if endpoint.owner_id() == owner_id => {
                endpoints.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
