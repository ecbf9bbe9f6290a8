//! # Resource Actor Framework
//!
//! Building blocks for the warehouse's in-memory resources: every resource type (items,
//! riders, delivery tasks, delivery batches) lives in its own actor, owns its own store,
//! and is reached through a cloneable, typed client.
//!
//! ## Why one actor per resource?
//!
//! - **Isolated state**: an actor processes its requests one at a time, so a batch's
//!   `current_task_index` and its task list can never be observed half-updated.
//! - **Uniform surface**: create, get, list, update, delete, plus resource-specific
//!   **actions** (`Scan`, `BeginDispatch`, `InsertTask`, `Advance`) for state transitions
//!   that carry their own rules.
//! - **Coordination by message**: when one resource needs another (a delivery task
//!   checking that its items exist), it holds the other resource's client in its context.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the domain type and its rules
//! 2. **Runtime** ([`ResourceActor`]) - the store and the request loop
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed requests and replies
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Rack {
//!     id: u32,
//!     label: String,
//!     slots_free: u32,
//! }
//!
//! #[derive(Debug)] struct RackCreate { label: String, slots: u32 }
//! #[derive(Debug)] struct RackUpdate { label: Option<String> }
//! #[derive(Debug)] enum RackAction { Occupy }
//!
//! #[derive(Debug, thiserror::Error)]
//! enum RackError {
//!     #[error("Rack {0} is full")]
//!     Full(u32),
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Rack {
//!     type Id = u32;
//!     type Create = RackCreate;
//!     type Update = RackUpdate;
//!     type Action = RackAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = RackError;
//!
//!     fn from_create_params(id: u32, params: RackCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: params.label, slots_free: params.slots })
//!     }
//!
//!     async fn on_update(&mut self, update: RackUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(label) = update.label { self.label = label; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: RackAction, _ctx: &()) -> Result<u32, Self::Error> {
//!         match action {
//!             RackAction::Occupy => {
//!                 if self.slots_free == 0 {
//!                     return Err(RackError::Full(self.id));
//!                 }
//!                 self.slots_free -= 1;
//!                 Ok(self.slots_free)
//!             }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Rack>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(RackCreate { label: "A1".into(), slots: 1 }).await.unwrap();
//!     assert_eq!(client.perform_action(id, RackAction::Occupy).await.unwrap(), 0);
//!
//!     let err = client.perform_action(id, RackAction::Occupy).await.unwrap_err();
//!     assert_eq!(err.to_string(), "Rack 1 is full");
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run()`, not to `new()`. All actors can therefore be created
//! first and wired afterwards, in any order. The delivery task actor receives the item
//! client this way.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests are processed **sequentially** within an actor
//! - Different actors run in **parallel**
//! - Callers that need a multi-step invariant across actors (dispatch, pickup insertion)
//!   serialize those steps themselves
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real `ResourceClient<T>` answered from scripted
//! expectations, for testing code around a client without spawning its actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
