//! # Batch Client
//!
//! Provides a high-level API for interacting with the `DeliveryTasksBatch` actor.
//! Lookups by day, rider or contained task are filters over `list()`.
use crate::batch_actor::{BatchAction, BatchError};
use crate::clients::into_resource_error;
use crate::model::{BatchCreate, BatchId, DeliveryTaskId, DeliveryTasksBatch, RiderId};
use async_trait::async_trait;
use chrono::NaiveDate;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the DeliveryTasksBatch actor.
#[derive(Clone)]
pub struct BatchClient {
    inner: ResourceClient<DeliveryTasksBatch>,
}

impl BatchClient {
    pub fn new(inner: ResourceClient<DeliveryTasksBatch>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<DeliveryTasksBatch> for BatchClient {
    type Error = BatchError;

    fn inner(&self) -> &ResourceClient<DeliveryTasksBatch> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        into_resource_error(e, BatchError::NotFound)
    }
}

impl BatchClient {
    #[instrument(skip(self))]
    pub async fn create_batch(&self, params: BatchCreate) -> Result<BatchId, BatchError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn insert_task(
        &self,
        id: BatchId,
        task: DeliveryTaskId,
        after_task_index: usize,
    ) -> Result<DeliveryTasksBatch, BatchError> {
        debug!("Sending request");
        self.inner
            .perform_action(
                id,
                BatchAction::InsertTask {
                    task,
                    after_task_index,
                },
            )
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn remove_task(&self, id: BatchId, task: DeliveryTaskId) -> Result<DeliveryTasksBatch, BatchError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, BatchAction::RemoveTask(task))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn advance(&self, id: BatchId) -> Result<DeliveryTasksBatch, BatchError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, BatchAction::Advance)
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_for_day(&self, date: NaiveDate) -> Result<Vec<DeliveryTasksBatch>, BatchError> {
        let batches = self.list().await?;
        Ok(batches.into_iter().filter(|b| b.date == date).collect())
    }

    /// The rider's batch for `date`. With several (not produced by dispatch), the newest wins.
    pub async fn find_for_rider(
        &self,
        rider: RiderId,
        date: NaiveDate,
    ) -> Result<Option<DeliveryTasksBatch>, BatchError> {
        let batches = self.list_for_day(date).await?;
        Ok(batches.into_iter().filter(|b| b.rider == rider).last())
    }

    /// Every batch that lists `task`.
    pub async fn find_containing(&self, task: DeliveryTaskId) -> Result<Vec<DeliveryTasksBatch>, BatchError> {
        let batches = self.list().await?;
        Ok(batches.into_iter().filter(|b| b.contains(task)).collect())
    }
}
