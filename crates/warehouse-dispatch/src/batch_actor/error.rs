//! Error types for the DeliveryTasksBatch actor.

use crate::model::{BatchId, DeliveryTaskId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BatchError {
    #[error("Delivery batch not found: {0}")]
    NotFound(String),

    #[error("A delivery batch needs at least one task")]
    Empty,

    #[error("Delivery task {0} appears more than once in the batch")]
    DuplicateTask(DeliveryTaskId),

    /// Insertion must land after the current task and inside the batch.
    #[error(
        "Cannot insert after position {after_task_index}: the batch has {len} tasks and is at task {current_task_index}"
    )]
    InsertOutOfRange {
        after_task_index: usize,
        len: usize,
        current_task_index: usize,
    },

    #[error("Delivery task {0} is not in the batch")]
    TaskNotInBatch(DeliveryTaskId),

    /// Only tasks after the current one can be taken back.
    #[error("Delivery task {task} at position {position} has already been reached (current task {current_task_index})")]
    AlreadyReached {
        task: DeliveryTaskId,
        position: usize,
        current_task_index: usize,
    },

    #[error("Current task index {index} is beyond the {len} tasks of the batch")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Delivery batch {0} has no remaining tasks")]
    Finished(BatchId),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for BatchError {
    fn from(msg: String) -> Self {
        BatchError::ActorCommunicationError(msg)
    }
}
