//! EndpointStore port - Persistence interface for webhook endpoints.
//!
//! The relay treats endpoint storage as an opaque collaborator: the receiver
//! only ever resolves an id to an endpoint, and the management API performs
//! owner-scoped CRUD. Validation happens in the domain before anything
//! reaches the store.

use async_trait::async_trait;

use crate::domain::endpoint::Endpoint;
use crate::domain::foundation::{DomainError, EndpointId, UserId};

/// Port for storing and retrieving webhook endpoints.
#[async_trait]
pub trait EndpointStore: Send + Sync {
    /// Persists a new endpoint.
    async fn create(&self, endpoint: &Endpoint) -> Result<(), DomainError>;

    /// Resolves an endpoint id, returning `None` for unknown ids.
    async fn get_by_id(&self, id: EndpointId) -> Result<Option<Endpoint>, DomainError>;

    /// Lists the owner's endpoints, newest first.
    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<Endpoint>, DomainError>;

    /// Deletes an endpoint scoped to its owner.
    ///
    /// Returns `false` when no endpoint with that id belongs to the owner;
    /// an unknown id and someone else's endpoint are indistinguishable.
    async fn delete(&self, owner_id: &UserId, id: EndpointId) -> Result<bool, DomainError>;
}
