//! # Planning Algorithms
//!
//! Pure, synchronous planners. The dispatch service gathers their inputs from the actors,
//! runs them on the blocking pool under a timeout, and applies the result.
//!
//! - [`dispatch`] - assigns a set of undispatched deliveries to riders, one route per rider
//! - [`pickup`] - finds the batch and position for a new pickup in the running day
//! - [`distance`] - haversine distances and travel-time matrices

pub mod dispatch;
pub mod distance;
pub mod pickup;

pub use dispatch::*;
pub use pickup::*;

use crate::model::{DeliveryTaskId, RiderId};
use crate::status::DeliveryStatus;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Input validation failures shared by both planners.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanningError {
    #[error("Delivery task {task} must have exactly one item, found {count}")]
    ItemCount { task: DeliveryTaskId, count: usize },

    #[error("Item of delivery task {0} has not been scanned")]
    NotScanned(DeliveryTaskId),

    #[error("Item of delivery task {task} has invalid volume {volume}")]
    InvalidVolume { task: DeliveryTaskId, volume: f64 },

    #[error("Delivery task {task} is expected at {expected}, before the day starts at {day_start}")]
    BeforeDayStart {
        task: DeliveryTaskId,
        expected: DateTime<Utc>,
        day_start: DateTime<Utc>,
    },

    #[error("Rider {rider} has invalid bag volume {volume}")]
    InvalidBagVolume { rider: RiderId, volume: f64 },

    #[error("Delivery task {0} has no location to visit")]
    MissingLocation(DeliveryTaskId),

    #[error("Rider {0} has more than one batch for the day")]
    DuplicateRider(RiderId),

    #[error("Delivery task {task} is {status}; pending tasks must be dispatched or in progress")]
    PendingStatus {
        task: DeliveryTaskId,
        status: DeliveryStatus,
    },
}
