//! DeleteEndpointHandler - Owner-scoped endpoint removal.

use std::sync::Arc;

use crate::domain::endpoint::EndpointError;
use crate::domain::foundation::{EndpointId, UserId};
use crate::ports::EndpointStore;

/// Command to delete a webhook endpoint.
#[derive(Debug, Clone)]
pub struct DeleteEndpointCommand {
    pub owner_id: UserId,
    pub endpoint_id: EndpointId,
}

/// Handler for endpoint deletion.
pub struct DeleteEndpointHandler {
    store: Arc<dyn EndpointStore>,
}

impl DeleteEndpointHandler {
    pub fn new(store: Arc<dyn EndpointStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeleteEndpointCommand) -> Result<(), EndpointError> {
        let deleted = self.store.delete(&cmd.owner_id, cmd.endpoint_id).await?;
        if !deleted {
            // Unknown id and someone else's endpoint look the same.
            return Err(EndpointError::NotFound);
        }

        tracing::info!(
            endpoint_id = %cmd.endpoint_id,
            owner_id = %cmd.owner_id,
            "Webhook endpoint deleted"
        );

        Ok(())
    }
}
