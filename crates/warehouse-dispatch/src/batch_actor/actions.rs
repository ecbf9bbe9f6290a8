//! Custom actions for the DeliveryTasksBatch actor.
//!
//! Every action returns the batch as stored afterwards and bump its `version`.

use crate::model::DeliveryTaskId;

#[derive(Debug, Clone)]
pub enum BatchAction {
    /// Inserts `task` directly after the task at `after_task_index`.
    ///
    /// The new order key is the midpoint between its neighbours, or the previous key
    /// plus one at the tail, so existing keys never change.
    ///
    /// # Errors
    /// Fails if the task is already in the batch, or if the position is before the
    /// current task or past the end.
    InsertTask {
        task: DeliveryTaskId,
        after_task_index: usize,
    },
    /// Takes back a task that has not been reached yet. Later tasks keep their keys.
    ///
    /// # Errors
    /// Fails if the task is not in the batch, or is at or before the current task.
    RemoveTask(DeliveryTaskId),
    /// Moves the current task pointer forward by one.
    Advance,
}
