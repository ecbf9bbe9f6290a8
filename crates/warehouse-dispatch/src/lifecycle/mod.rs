//! # System Lifecycle & Orchestration
//!
//! Starts the four resource actors, wires them together, and shuts them down.
//!
//! ## Wiring
//!
//! Actors are created first and receive their dependencies when they start running:
//!
//! ```rust,ignore
//! let (item_actor, item_client) = item_actor::new(config.actor_buffer);
//! let (delivery_actor, delivery_client) = delivery_actor::new(config.actor_buffer);
//!
//! // Items stamp their creation time from the shared clock
//! tokio::spawn(item_actor.run(clock.clone()));
//! // Delivery tasks verify their items exist on create
//! tokio::spawn(delivery_actor.run(item_client.clone()));
//! ```
//!
//! | Actor | Context |
//! |-------|---------|
//! | Item | `SharedClock` |
//! | Rider | `()` |
//! | DeliveryTask | `ItemClient` |
//! | DeliveryTasksBatch | `()` |
//!
//! The dependency graph is acyclic, so dropping every client closes every channel.
//!
//! ## Graceful Shutdown
//!
//! 1. Drop the clients held by the system and by the [`DispatchService`](crate::services::DispatchService).
//! 2. Each actor's `recv()` returns `None` once its last sender is gone. The delivery
//!    actor holds an `ItemClient`, so the item actor stops after the delivery actor.
//! 3. Await every actor task.
//!
//! Clones of the clients or the service that outlive the system keep their actors alive,
//! and `shutdown()` waits for them.

pub mod warehouse_system;

pub use warehouse_system::*;
