//! # Item Actor
//!
//! Owns the inventory. Items are created from the inventory upload (one item per row,
//! alongside its delivery task) and later scanned, which records their weight and volume.
//! Dispatch refuses items that have not been scanned.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Item`]
//! - [`error`] - [`ItemError`]
//! - [`actions`] - [`ItemAction::Scan`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Context
//!
//! The actor runs with a [`SharedClock`](crate::clock::SharedClock): creation and scan
//! timestamps come from it.
//!
//! ```rust
//! use std::sync::Arc;
//! use warehouse_dispatch::clock::SystemClock;
//! use warehouse_dispatch::item_actor;
//! use warehouse_dispatch::model::ItemCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = item_actor::new(16);
//!     tokio::spawn(actor.run(Arc::new(SystemClock)));
//!
//!     let id = client
//!         .create_item(ItemCreate {
//!             name: "Kettle".into(),
//!             description: "1.5L steel kettle".into(),
//!             item_location: None,
//!         })
//!         .await?;
//!     let item = client.scan(id, 1.2, 3.4).await?;
//!     assert!(item.is_scanned());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ItemClient;
use crate::model::Item;
use resource_actor::ResourceActor;

/// Creates a new Item actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Item>, ItemClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ItemClient::new(generic_client))
}
