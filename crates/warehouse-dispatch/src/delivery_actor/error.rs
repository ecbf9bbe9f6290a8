//! Error types for the DeliveryTask actor.

use crate::item_actor::ItemError;
use crate::model::{DeliveryTaskId, ItemId};
use crate::status::DeliveryStatus;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    #[error("Delivery task not found: {0}")]
    NotFound(String),

    #[error("A delivery task needs at least one item")]
    NoItems,

    #[error("Item {0} does not exist")]
    UnknownItem(ItemId),

    #[error("Item lookup failed: {0}")]
    ItemLookup(#[source] ItemError),

    /// The requested status change is not allowed from the current status.
    #[error("Cannot move delivery task {task} from {from} to {to}")]
    InvalidTransition {
        task: DeliveryTaskId,
        from: DeliveryStatus,
        to: DeliveryStatus,
    },

    /// Delivery information is frozen once dispatch begins, and active tasks cannot be deleted.
    #[error("Delivery task {task} is {status}")]
    Locked {
        task: DeliveryTaskId,
        status: DeliveryStatus,
    },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for DeliveryError {
    fn from(msg: String) -> Self {
        DeliveryError::ActorCommunicationError(msg)
    }
}
