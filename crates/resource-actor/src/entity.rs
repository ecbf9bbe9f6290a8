//! # ActorEntity Trait
//!
//! The contract every warehouse resource (Item, Rider, DeliveryTask, DeliveryTasksBatch)
//! implements so the generic [`ResourceActor`](crate::ResourceActor) can own it.
//!
//! Associated types pin each resource to its own payloads: an `Item` actor only accepts
//! `ItemCreate`, and a batch actor cannot be handed a rider update. Lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`) and the `handle_action` dispatcher receive the
//! runtime `Context`, which is how one actor reaches another (the delivery actor checks
//! items through an item client it receives in `run()`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Ids
/// `Id` is generated by the actor from a sequential `u32` counter and must be ordered:
/// the store iterates in id order, so `List` returns resources in creation order.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors. The `Context` is injected once,
/// in `ResourceActor::run`, and passed by reference to every hook.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `Scan`, `InsertTask`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: callers match on a single
    /// `DeliveryError` regardless of which action failed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the id and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the entity is constructed and before it is stored.
    /// Returning an error discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed. Returning an error keeps it.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
