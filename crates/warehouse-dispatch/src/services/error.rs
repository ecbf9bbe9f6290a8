//! Errors surfaced by the dispatch service.

use crate::algorithm::PlanningError;
use crate::batch_actor::{BatchError, TaskOrderError};
use crate::delivery_actor::DeliveryError;
use crate::display::alert_message;
use crate::item_actor::ItemError;
use crate::model::{DeliveryTaskId, DeliveryType, RiderId};
use crate::rider_actor::RiderError;
use crate::status::DeliveryStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error(transparent)]
    Item(#[from] ItemError),

    #[error(transparent)]
    Rider(#[from] RiderError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Planning(#[from] PlanningError),

    /// The batch failed the task-order check; the message is the rider-facing alert.
    #[error(transparent)]
    TaskOrder(#[from] TaskOrderError),

    #[error("Delivery task not found: {0}")]
    TaskNotFound(DeliveryTaskId),

    #[error("Rider not found: {0}")]
    RiderNotFound(RiderId),

    #[error("Delivery task {task} is {status}, expected {expected}")]
    InvalidTaskStatus {
        task: DeliveryTaskId,
        status: DeliveryStatus,
        expected: DeliveryStatus,
    },

    #[error("Delivery task {task} is a {actual} task, expected {expected}")]
    WrongDeliveryType {
        task: DeliveryTaskId,
        actual: DeliveryType,
        expected: DeliveryType,
    },

    #[error("Status {0} cannot be set on a batched delivery task")]
    UnsupportedStatus(DeliveryStatus),

    #[error("Rider {0} is listed more than once")]
    DuplicateRider(RiderId),

    #[error("Delivery task {0} is listed more than once")]
    DuplicateTask(DeliveryTaskId),

    #[error("No delivery tasks to dispatch")]
    NoTasks,

    #[error("No riders to dispatch to")]
    NoRiders,

    #[error("Rider {0} already has a delivery batch for today")]
    RiderAlreadyBatched(RiderId),

    #[error("Delivery task {0} is not part of any delivery batch")]
    TaskNotInBatch(DeliveryTaskId),

    #[error("Delivery task {0} appears in more than one delivery batch")]
    TaskInMultipleBatches(DeliveryTaskId),

    #[error("Delivery task {task} is not the current task of its batch (current is {current:?})")]
    NotCurrentTask {
        task: DeliveryTaskId,
        current: Option<DeliveryTaskId>,
    },

    #[error("Rider {0} has no delivery batch for today")]
    NoBatchForRider(RiderId),

    #[error("No running delivery batch can take pickup task {0}")]
    NoPickupCandidate(DeliveryTaskId),

    #[error("Planner did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Planner failed: {0}")]
    PlannerFailed(String),
}

impl DispatchError {
    /// Message shown to the operator; falls back to a generic text when the error has none.
    pub fn detail(&self) -> String {
        alert_message(Some(&self.to_string()))
    }
}
