//! # Item Client
//!
//! Provides a high-level API for interacting with the `Item` actor.
use crate::clients::into_resource_error;
use crate::item_actor::{ItemAction, ItemActionResult, ItemError};
use crate::model::{Item, ItemCreate, ItemId, ItemUpdate};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Item actor.
#[derive(Clone)]
pub struct ItemClient {
    inner: ResourceClient<Item>,
}

impl ItemClient {
    pub fn new(inner: ResourceClient<Item>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Item> for ItemClient {
    type Error = ItemError;

    fn inner(&self) -> &ResourceClient<Item> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        into_resource_error(e, ItemError::NotFound)
    }
}

impl ItemClient {
    #[instrument(skip(self))]
    pub async fn create_item(&self, params: ItemCreate) -> Result<ItemId, ItemError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(&self, id: ItemId, update: ItemUpdate) -> Result<Item, ItemError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Fetches an item that must exist.
    pub async fn require(&self, id: ItemId) -> Result<Item, ItemError> {
        self.get(id)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    /// Records a scan and returns the updated item.
    #[instrument(skip(self))]
    pub async fn scan(&self, id: ItemId, weight: f64, volume: f64) -> Result<Item, ItemError> {
        debug!("Scanning item");
        match self
            .inner
            .perform_action(id, ItemAction::Scan { weight, volume })
            .await
        {
            Ok(ItemActionResult::Scan(item)) => Ok(item),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToolScanInformation;
    use chrono::Utc;
    use resource_actor::mock::{create_mock_client, expect_action, MockClient};

    fn item(id: u32) -> Item {
        Item {
            id: ItemId(id),
            name: "Chair".into(),
            description: "Folding chair".into(),
            tool_scan_information: None,
            item_location: None,
            timestamp_created: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_scan_sends_measurements() {
        let (client, mut receiver) = create_mock_client::<Item>(10);
        let item_client = ItemClient::new(client);

        let scan_task = tokio::spawn(async move { item_client.scan(ItemId(1), 2.5, 8.0).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ItemId(1));
        let ItemAction::Scan { weight, volume } = action;
        assert_eq!((weight, volume), (2.5, 8.0));

        let mut scanned = item(1);
        scanned.tool_scan_information = Some(ToolScanInformation {
            volume,
            weight,
            timestamp: Utc::now(),
        });
        responder.send(Ok(ItemActionResult::Scan(scanned))).unwrap();

        let result = scan_task.await.unwrap().unwrap();
        assert_eq!(result.volume(), Some(8.0));
    }

    #[tokio::test]
    async fn test_entity_error_is_unboxed() {
        let (client, mut receiver) = create_mock_client::<Item>(10);
        let item_client = ItemClient::new(client);

        let scan_task = tokio::spawn(async move { item_client.scan(ItemId(1), 0.0, 1.0).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::EntityError(Box::new(ItemError::InvalidScan {
                weight: 0.0,
                volume: 1.0,
            }))))
            .unwrap();

        assert_eq!(
            scan_task.await.unwrap().unwrap_err(),
            ItemError::InvalidScan {
                weight: 0.0,
                volume: 1.0
            }
        );
    }

    #[tokio::test]
    async fn test_require_missing_item() {
        let mut mock = MockClient::<Item>::new();
        mock.expect_get(ItemId(9)).return_ok(None);
        mock.expect_get(ItemId(1)).return_ok(Some(item(1)));

        let client = ItemClient::new(mock.client());
        assert_eq!(
            client.require(ItemId(9)).await.unwrap_err(),
            ItemError::NotFound("item_9".into())
        );
        assert_eq!(client.require(ItemId(1)).await.unwrap().name, "Chair");
        mock.verify();
    }

    #[tokio::test]
    async fn test_foreign_error_becomes_communication_error() {
        let (client, mut receiver) = create_mock_client::<Item>(10);
        let item_client = ItemClient::new(client);

        let scan_task = tokio::spawn(async move { item_client.scan(ItemId(1), 1.0, 1.0).await });
        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::EntityError(Box::new(std::io::Error::other(
                "disk on fire",
            )))))
            .unwrap();

        assert_eq!(
            scan_task.await.unwrap().unwrap_err(),
            ItemError::ActorCommunicationError("disk on fire".into())
        );
    }
}
