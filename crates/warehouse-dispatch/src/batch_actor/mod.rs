//! # Delivery Batch Actor
//!
//! Owns each rider's daily batch: the ranked task list and the current task pointer.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`DeliveryTasksBatch`]
//! - [`error`] - [`BatchError`]
//! - [`actions`] - [`BatchAction::InsertTask`] and [`BatchAction::Advance`]
//! - [`validation`] - task-order checks against live task statuses
//! - [`new()`] - Factory function that creates the actor and client
//!
//! The batch stores task ids only. Checking the order against task statuses needs the
//! delivery actor's view of each task, so [`validation::check_task_order`] runs in the
//! dispatch service and the console view, not inside this actor.

pub mod actions;
pub mod entity;
pub mod error;
pub mod validation;

pub use actions::*;
pub use error::*;
pub use validation::{check_task_order, rank_by_order_key, TaskOrderError};

use crate::clients::BatchClient;
use crate::model::DeliveryTasksBatch;
use resource_actor::ResourceActor;

/// Creates a new DeliveryTasksBatch actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<DeliveryTasksBatch>, BatchClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, BatchClient::new(generic_client))
}
