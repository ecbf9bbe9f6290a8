//! # Delivery Task Actor
//!
//! Owns delivery and pickup tasks and enforces their status machine.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`DeliveryTask`]
//! - [`error`] - [`DeliveryError`]
//! - [`actions`] - [`DeliveryAction`] status transitions
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Context
//!
//! The actor depends on the Item actor: `on_create` looks up every item id through the
//! [`ItemClient`] it receives in `run()`, and refuses tasks that name unknown items.
//!
//! ```rust,ignore
//! let (item_actor, item_client) = item_actor::new(32);
//! let (delivery_actor, delivery_client) = delivery_actor::new(32);
//! tokio::spawn(item_actor.run(clock));
//! tokio::spawn(delivery_actor.run(item_client.clone()));
//! ```
//!
//! ## Status transitions
//!
//! Dispatch moves a task through `BeginDispatch` (undispatched to dispatching), then
//! either `ConfirmDispatch(rider)` or `AbortDispatch`. Riders then push it forward with
//! `UpdateStatus`, which only accepts a higher-ranked status. `RecallDispatch` takes a
//! dispatched task back to undispatched when its batch is discarded.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::DeliveryClient;
use crate::model::DeliveryTask;
use resource_actor::ResourceActor;

/// Creates a new DeliveryTask actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<DeliveryTask>, DeliveryClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, DeliveryClient::new(generic_client))
}
