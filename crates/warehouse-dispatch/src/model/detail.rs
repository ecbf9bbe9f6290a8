//! Populated views: a task with its items and rider, a batch with its rider and tasks.
//!
//! Actors store references by id. The dispatch service joins them into these shapes for
//! the planners, the order checks and the wire DTOs.

use crate::batch_actor::{check_task_order, TaskOrderError};
use crate::model::{DeliveryLocation, DeliveryTask, DeliveryTaskId, DeliveryTasksBatch, Item, Rider};
use crate::status::DeliveryStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTaskDetail {
    pub task: DeliveryTask,
    /// In the same order as `task.item_ids`.
    pub items: Vec<Item>,
    pub rider: Option<Rider>,
}

impl DeliveryTaskDetail {
    pub fn id(&self) -> DeliveryTaskId {
        self.task.id
    }

    pub fn status(&self) -> DeliveryStatus {
        self.task.status
    }

    /// Where the rider has to go: the item's location for a pickup, the delivery
    /// location otherwise.
    pub fn stop_location(&self) -> Option<&DeliveryLocation> {
        if self.task.is_pickup() {
            self.items.first().and_then(|item| item.item_location.as_ref())
        } else {
            Some(&self.task.delivery_information.delivery_location)
        }
    }

    /// Total scanned volume, or `None` if any item is unscanned.
    pub fn scanned_volume(&self) -> Option<f64> {
        self.items.iter().map(Item::volume).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTasksBatchDetail {
    pub batch: DeliveryTasksBatch,
    pub rider: Rider,
    /// Parallel to `batch.tasks`.
    pub tasks: Vec<DeliveryTaskDetail>,
}

impl DeliveryTasksBatchDetail {
    /// Checks the batch's task order against the tasks' live statuses.
    pub fn check_order(&self) -> Result<(), TaskOrderError> {
        let ranked: Vec<_> = self
            .batch
            .tasks
            .iter()
            .zip(&self.tasks)
            .map(|(task_ref, detail)| (task_ref.order_key, detail.status()))
            .collect();
        check_task_order(self.batch.current_task_index, &ranked)
    }

    /// Tasks from the current index onward that are not completed, with their batch positions.
    pub fn pending(&self) -> impl Iterator<Item = (usize, &DeliveryTaskDetail)> {
        self.tasks
            .iter()
            .enumerate()
            .skip(self.batch.current_task_index)
            .filter(|(_, detail)| detail.status() != DeliveryStatus::Completed)
    }

    pub fn current(&self) -> Option<&DeliveryTaskDetail> {
        self.tasks.get(self.batch.current_task_index)
    }

    /// The task completed just before the current one.
    pub fn previous(&self) -> Option<&DeliveryTaskDetail> {
        self.batch
            .current_task_index
            .checked_sub(1)
            .and_then(|index| self.tasks.get(index))
    }
}
