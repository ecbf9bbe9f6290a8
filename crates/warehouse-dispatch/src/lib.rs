//! # Warehouse Dispatch
//!
//! The backend of a warehouse delivery console. Managers upload inventory and rider
//! rosters, scanning staff record each item's weight and volume, dispatch assigns the
//! day's deliveries to riders as ordered batches, pickups are slotted into running
//! batches, and riders advance their tasks through the status workflow.
//!
//! - [`model`] - items, riders, delivery tasks, batches and their shared value types
//! - [`status`] - the ranked delivery status with its labels and colours
//! - `*_actor` - one resource actor per model type, built on [`resource_actor`]
//! - [`clients`] - typed wrappers around each actor
//! - [`algorithm`] - the dispatch and pickup planners
//! - [`services`] - operations spanning several actors
//! - [`dto`] and [`display`] - the wire contract and what the console renders
//! - [`lifecycle`] - starts and stops the whole system

pub mod algorithm;
pub mod batch_actor;
pub mod clients;
pub mod clock;
pub mod config;
pub mod delivery_actor;
pub mod display;
pub mod dto;
pub mod item_actor;
pub mod lifecycle;
pub mod model;
pub mod rider_actor;
pub mod services;
pub mod status;
