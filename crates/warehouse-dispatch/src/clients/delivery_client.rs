//! # Delivery Client
//!
//! Provides a high-level API for interacting with the `DeliveryTask` actor: creation,
//! the dispatch status transitions, and filtered listings.
use crate::clients::into_resource_error;
use crate::delivery_actor::{DeliveryAction, DeliveryError};
use crate::model::{DeliveryTask, DeliveryTaskCreate, DeliveryTaskId, DeliveryTaskUpdate, RiderId};
use crate::status::DeliveryStatus;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the DeliveryTask actor.
#[derive(Clone)]
pub struct DeliveryClient {
    inner: ResourceClient<DeliveryTask>,
}

impl DeliveryClient {
    pub fn new(inner: ResourceClient<DeliveryTask>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<DeliveryTask> for DeliveryClient {
    type Error = DeliveryError;

    fn inner(&self) -> &ResourceClient<DeliveryTask> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        into_resource_error(e, DeliveryError::NotFound)
    }
}

impl DeliveryClient {
    #[instrument(skip(self))]
    pub async fn create_task(&self, params: DeliveryTaskCreate) -> Result<DeliveryTaskId, DeliveryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_task(
        &self,
        id: DeliveryTaskId,
        update: DeliveryTaskUpdate,
    ) -> Result<DeliveryTask, DeliveryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Fetches a task that must exist.
    pub async fn require(&self, id: DeliveryTaskId) -> Result<DeliveryTask, DeliveryError> {
        self.get(id)
            .await?
            .ok_or_else(|| DeliveryError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn act(&self, id: DeliveryTaskId, action: DeliveryAction) -> Result<DeliveryTask, DeliveryError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    pub async fn begin_dispatch(&self, id: DeliveryTaskId) -> Result<DeliveryTask, DeliveryError> {
        self.act(id, DeliveryAction::BeginDispatch).await
    }

    pub async fn confirm_dispatch(
        &self,
        id: DeliveryTaskId,
        rider: RiderId,
    ) -> Result<DeliveryTask, DeliveryError> {
        self.act(id, DeliveryAction::ConfirmDispatch(rider)).await
    }

    pub async fn abort_dispatch(&self, id: DeliveryTaskId) -> Result<DeliveryTask, DeliveryError> {
        self.act(id, DeliveryAction::AbortDispatch).await
    }

    pub async fn recall_dispatch(&self, id: DeliveryTaskId) -> Result<DeliveryTask, DeliveryError> {
        self.act(id, DeliveryAction::RecallDispatch).await
    }

    pub async fn update_status(
        &self,
        id: DeliveryTaskId,
        status: DeliveryStatus,
    ) -> Result<DeliveryTask, DeliveryError> {
        self.act(id, DeliveryAction::UpdateStatus(status)).await
    }

    pub async fn list_undispatched(&self) -> Result<Vec<DeliveryTask>, DeliveryError> {
        let tasks = self.list().await?;
        Ok(tasks
            .into_iter()
            .filter(|t| t.status == DeliveryStatus::Undispatched)
            .collect())
    }

    /// Tasks assigned to `rider` that are not completed yet.
    pub async fn list_for_rider(&self, rider: RiderId) -> Result<Vec<DeliveryTask>, DeliveryError> {
        let tasks = self.list().await?;
        Ok(tasks
            .into_iter()
            .filter(|t| t.rider == Some(rider) && t.status != DeliveryStatus::Completed)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, DeliveryInformation, DeliveryLocation, DeliveryType, ItemId};
    use chrono::Utc;
    use resource_actor::mock::{create_mock_client, expect_action, MockClient};

    fn task(id: u32, rider: Option<u32>, status: DeliveryStatus) -> DeliveryTask {
        DeliveryTask {
            id: DeliveryTaskId(id),
            item_ids: vec![ItemId(id)],
            delivery_information: DeliveryInformation {
                expected_delivery_time: Utc::now(),
                delivery_type: DeliveryType::Delivery,
                awb_id: format!("AWB-{id}"),
                delivery_location: DeliveryLocation::new("Somewhere", Coordinate::new(17.4, 78.4)),
            },
            rider: rider.map(RiderId),
            status,
            delivery_route: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_listing_filters() {
        let all = vec![
            task(1, None, DeliveryStatus::Undispatched),
            task(2, Some(1), DeliveryStatus::Dispatched),
            task(3, Some(1), DeliveryStatus::Completed),
            task(4, Some(2), DeliveryStatus::InProgress),
        ];
        let mut mock = MockClient::<DeliveryTask>::new();
        mock.expect_list().return_ok(all.clone());
        mock.expect_list().return_ok(all);

        let client = DeliveryClient::new(mock.client());
        let undispatched = client.list_undispatched().await.unwrap();
        assert_eq!(undispatched.len(), 1);
        assert_eq!(undispatched[0].id, DeliveryTaskId(1));

        let for_rider: Vec<_> = client
            .list_for_rider(RiderId(1))
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(for_rider, vec![DeliveryTaskId(2)]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_confirm_dispatch_carries_rider() {
        let (client, mut receiver) = create_mock_client::<DeliveryTask>(10);
        let delivery_client = DeliveryClient::new(client);

        let call = tokio::spawn(async move {
            delivery_client
                .confirm_dispatch(DeliveryTaskId(5), RiderId(3))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, DeliveryTaskId(5));
        match action {
            DeliveryAction::ConfirmDispatch(rider) => assert_eq!(rider, RiderId(3)),
            other => panic!("Expected ConfirmDispatch, got {other:?}"),
        }
        responder
            .send(Ok(task(5, Some(3), DeliveryStatus::Dispatched)))
            .unwrap();

        assert_eq!(call.await.unwrap().unwrap().rider, Some(RiderId(3)));
    }

    #[tokio::test]
    async fn test_unknown_task_maps_to_not_found() {
        let mut mock = MockClient::<DeliveryTask>::new();
        mock.expect_action(DeliveryTaskId(8))
            .return_err(FrameworkError::NotFound("delivery_8".into()));

        let client = DeliveryClient::new(mock.client());
        assert_eq!(
            client.begin_dispatch(DeliveryTaskId(8)).await.unwrap_err(),
            DeliveryError::NotFound("delivery_8".into())
        );
        mock.verify();
    }
}
