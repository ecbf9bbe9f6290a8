/// A rider's ordered list of tasks for one day.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait. Its
/// custom actions insert a task into the route and advance the current task pointer.
use crate::model::{BatchId, DeliveryTaskId, RiderId};
use chrono::{DateTime, NaiveDate, Utc};

/// A task's place in a batch. Tasks are ranked by ascending `order_key`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryTaskRef {
    pub delivery_task: DeliveryTaskId,
    pub order_key: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTasksBatch {
    pub id: BatchId,
    pub rider: RiderId,
    pub date: NaiveDate,
    /// Kept sorted by `order_key`.
    pub tasks: Vec<DeliveryTaskRef>,
    /// Position of the task the rider is working on; equals `tasks.len()` once finished.
    pub current_task_index: usize,
    /// Incremented on every mutation.
    pub version: u32,
    pub created_at: DateTime<Utc>,
}

impl DeliveryTasksBatch {
    pub fn task_ids(&self) -> impl Iterator<Item = DeliveryTaskId> + '_ {
        self.tasks.iter().map(|t| t.delivery_task)
    }

    pub fn contains(&self, task: DeliveryTaskId) -> bool {
        self.task_ids().any(|id| id == task)
    }

    pub fn position_of(&self, task: DeliveryTaskId) -> Option<usize> {
        self.task_ids().position(|id| id == task)
    }

    pub fn current_task(&self) -> Option<DeliveryTaskId> {
        self.tasks
            .get(self.current_task_index)
            .map(|t| t.delivery_task)
    }

    pub fn is_finished(&self) -> bool {
        self.current_task_index >= self.tasks.len()
    }
}

/// Payload for creating a batch. Tasks receive order keys `0, 1, 2, ...` in the given order.
#[derive(Debug, Clone)]
pub struct BatchCreate {
    pub rider: RiderId,
    pub date: NaiveDate,
    pub task_ids: Vec<DeliveryTaskId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchUpdate {
    pub current_task_index: Option<usize>,
}
