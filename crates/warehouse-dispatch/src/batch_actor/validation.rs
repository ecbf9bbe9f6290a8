//! Task-order checks for a rider's batch.
//!
//! A healthy batch, ranked by order key, looks like
//!
//! ```text
//! completed ... completed | dispatched or in_progress | dispatched ... dispatched
//!                           ^ current_task_index
//! ```
//!
//! The first violation found (scanning positions in rank order) is reported. Its message
//! is the alert shown to the rider.

use crate::status::DeliveryStatus;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskOrderError {
    #[error("Current task index {index} is beyond the {len} tasks of the batch")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Order key {0} is used by more than one task")]
    DuplicateOrderKey(f64),

    #[error("You have not completed the previous delivery tasks")]
    PreviousNotCompleted { position: usize },

    #[error("You have not completed the current delivery task")]
    CurrentNotActive { position: usize },

    #[error("You have not completed the upcoming delivery tasks")]
    UpcomingNotDispatched { position: usize },
}

/// Sorts by ascending order key, keeping the input order for equal keys.
pub fn rank_by_order_key<T>(mut tasks: Vec<T>, order_key: impl Fn(&T) -> f64) -> Vec<T> {
    tasks.sort_by(|a, b| order_key(a).total_cmp(&order_key(b)));
    tasks
}

/// Checks `(order_key, status)` pairs against the batch's current task index.
pub fn check_task_order(
    current_task_index: usize,
    tasks: &[(f64, DeliveryStatus)],
) -> Result<(), TaskOrderError> {
    if current_task_index > tasks.len() {
        return Err(TaskOrderError::IndexOutOfRange {
            index: current_task_index,
            len: tasks.len(),
        });
    }

    let ranked = rank_by_order_key(tasks.to_vec(), |(key, _)| *key);
    if let Some(pair) = ranked.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(TaskOrderError::DuplicateOrderKey(pair[0].0));
    }

    for (position, (_, status)) in ranked.iter().enumerate() {
        if position < current_task_index && *status != DeliveryStatus::Completed {
            return Err(TaskOrderError::PreviousNotCompleted { position });
        }
        if position == current_task_index
            && !matches!(status, DeliveryStatus::Dispatched | DeliveryStatus::InProgress)
        {
            return Err(TaskOrderError::CurrentNotActive { position });
        }
        if position > current_task_index && *status != DeliveryStatus::Dispatched {
            return Err(TaskOrderError::UpcomingNotDispatched { position });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use DeliveryStatus::*;

    #[test]
    fn test_healthy_batch_passes() {
        let tasks = [(0.0, Completed), (1.0, InProgress), (1.5, Dispatched), (2.0, Dispatched)];
        assert_eq!(check_task_order(1, &tasks), Ok(()));
    }

    #[test]
    fn test_finished_batch_passes() {
        assert_eq!(check_task_order(2, &[(0.0, Completed), (1.0, Completed)]), Ok(()));
        assert_eq!(check_task_order(0, &[]), Ok(()));
    }

    #[test]
    fn test_tasks_are_ranked_before_checking() {
        // Listed out of order; ranked they read completed, dispatched.
        let tasks = [(5.0, Dispatched), (1.0, Completed)];
        assert_eq!(check_task_order(1, &tasks), Ok(()));
    }

    #[test]
    fn test_previous_incomplete() {
        let err = check_task_order(1, &[(0.0, InProgress), (1.0, Dispatched)]).unwrap_err();
        assert_eq!(err, TaskOrderError::PreviousNotCompleted { position: 0 });
        assert_eq!(err.to_string(), "You have not completed the previous delivery tasks");
    }

    #[test]
    fn test_current_must_be_active() {
        let err = check_task_order(0, &[(0.0, Completed), (1.0, Dispatched)]).unwrap_err();
        assert_eq!(err.to_string(), "You have not completed the current delivery task");
    }

    #[test]
    fn test_upcoming_must_be_dispatched() {
        let err = check_task_order(0, &[(0.0, InProgress), (1.0, InProgress)]).unwrap_err();
        assert_eq!(err, TaskOrderError::UpcomingNotDispatched { position: 1 });
        assert_eq!(err.to_string(), "You have not completed the upcoming delivery tasks");
    }

    #[test]
    fn test_index_and_key_violations() {
        assert_eq!(
            check_task_order(3, &[(0.0, Completed)]),
            Err(TaskOrderError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            check_task_order(0, &[(1.0, Dispatched), (1.0, Dispatched)]),
            Err(TaskOrderError::DuplicateOrderKey(1.0))
        );
    }
}
