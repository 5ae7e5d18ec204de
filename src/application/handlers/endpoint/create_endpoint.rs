//! CreateEndpointHandler - Registers a new forwarding rule.

use std::sync::Arc;

use crate::domain::endpoint::{Endpoint, EndpointError};
use crate::domain::foundation::UserId;
use crate::ports::EndpointStore;

/// Command to create a new webhook endpoint.
#[derive(Debug, Clone)]
pub struct CreateEndpointCommand {
    pub owner_id: UserId,
    pub target: String,
    pub method: String,
}

/// Handler for endpoint creation.
pub struct CreateEndpointHandler {
    store: Arc<dyn EndpointStore>,
}

impl CreateEndpointHandler {
    pub fn new(store: Arc<dyn EndpointStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreateEndpointCommand) -> Result<Endpoint, EndpointError> {
        // Validation happens in the domain constructor; invalid targets and
        // methods never reach the store.
        let endpoint = Endpoint::new(cmd.owner_id, &cmd.target, &cmd.method)?;
        self.store.create(&endpoint).await?;

        tracing::info!(
            endpoint_id = %endpoint.id(),
            owner_id = %endpoint.owner_id(),
            "Webhook endpoint created"
        );

        Ok(endpoint)
    }
}
