//! Entity trait implementation for the DeliveryTasksBatch domain type.

use crate::batch_actor::{BatchAction, BatchError};
use crate::model::{BatchCreate, BatchId, BatchUpdate, DeliveryTaskRef, DeliveryTasksBatch};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use std::collections::HashSet;

impl DeliveryTasksBatch {
    /// Order key for a task placed right after position `after`.
    fn order_key_after(&self, after: usize) -> f64 {
        let previous = self.tasks[after].order_key;
        match self.tasks.get(after + 1) {
            Some(next) => (previous + next.order_key) / 2.0,
            None => previous + 1.0,
        }
    }
}

#[async_trait]
impl ActorEntity for DeliveryTasksBatch {
    type Id = BatchId;
    type Create = BatchCreate;
    type Update = BatchUpdate;
    type Action = BatchAction;
    type ActionResult = DeliveryTasksBatch;
    type Context = ();
    type Error = BatchError;

    fn from_create_params(id: BatchId, params: BatchCreate) -> Result<Self, Self::Error> {
        if params.task_ids.is_empty() {
            return Err(BatchError::Empty);
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = params.task_ids.iter().find(|task| !seen.insert(**task)) {
            return Err(BatchError::DuplicateTask(*duplicate));
        }

        let tasks = params
            .task_ids
            .into_iter()
            .enumerate()
            .map(|(index, delivery_task)| DeliveryTaskRef {
                delivery_task,
                order_key: index as f64,
            })
            .collect();

        Ok(Self {
            id,
            rider: params.rider,
            date: params.date,
            tasks,
            current_task_index: 0,
            version: 0,
            created_at: params.created_at,
        })
    }

    async fn on_update(&mut self, update: BatchUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(index) = update.current_task_index {
            if index > self.tasks.len() {
                return Err(BatchError::IndexOutOfRange {
                    index,
                    len: self.tasks.len(),
                });
            }
            self.current_task_index = index;
        }
        self.version += 1;
        Ok(())
    }

    async fn handle_action(&mut self, action: BatchAction, _ctx: &()) -> Result<DeliveryTasksBatch, Self::Error> {
        match action {
            BatchAction::InsertTask {
                task,
                after_task_index,
            } => {
                if self.contains(task) {
                    return Err(BatchError::DuplicateTask(task));
                }
                if after_task_index >= self.tasks.len() || after_task_index < self.current_task_index {
                    return Err(BatchError::InsertOutOfRange {
                        after_task_index,
                        len: self.tasks.len(),
                        current_task_index: self.current_task_index,
                    });
                }
                let order_key = self.order_key_after(after_task_index);
                self.tasks.insert(
                    after_task_index + 1,
                    DeliveryTaskRef {
                        delivery_task: task,
                        order_key,
                    },
                );
            }
            BatchAction::RemoveTask(task) => {
                let position = self.position_of(task).ok_or(BatchError::TaskNotInBatch(task))?;
                if position <= self.current_task_index {
                    return Err(BatchError::AlreadyReached {
                        task,
                        position,
                        current_task_index: self.current_task_index,
                    });
                }
                self.tasks.remove(position);
            }
            BatchAction::Advance => {
                if self.is_finished() {
                    return Err(BatchError::Finished(self.id));
                }
                self.current_task_index += 1;
            }
        }
        self.version += 1;
        Ok(self.clone())
    }
}
