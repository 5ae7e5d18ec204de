//! ListEndpointsHandler - Owner-scoped endpoint listing.

use std::sync::Arc;

use crate::domain::endpoint::{Endpoint, EndpointError};
use crate::domain::foundation::UserId;
use crate::ports::EndpointStore;

/// Handler for listing a user's endpoints, newest first.
pub struct ListEndpointsHandler {
    store: Arc<dyn EndpointStore>,
}

impl ListEndpointsHandler {
    pub fn new(store: Arc<dyn EndpointStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, owner_id: &UserId) -> Result<Vec<Endpoint>, EndpointError> {
        Ok(self.store.list_for_owner(owner_id).await?)
    }
}
