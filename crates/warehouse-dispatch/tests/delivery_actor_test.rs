use chrono::{TimeZone, Utc};
use resource_actor::mock::MockClient;
use resource_actor::ActorClient;
use warehouse_dispatch::clients::{DeliveryClient, ItemClient};
use warehouse_dispatch::delivery_actor::DeliveryError;
use warehouse_dispatch::model::{
    Coordinate, DeliveryInformation, DeliveryLocation, DeliveryTaskCreate, DeliveryTaskUpdate, DeliveryType, Item,
    ItemId, RiderId,
};
use warehouse_dispatch::status::DeliveryStatus;

fn item(id: u32) -> Item {
    Item {
        id: ItemId(id),
        name: format!("Parcel {id}"),
        description: "Boxed".to_string(),
        tool_scan_information: None,
        item_location: None,
        timestamp_created: Utc.with_ymd_and_hms(2025, 3, 1, 5, 0, 0).unwrap(),
    }
}

fn info(awb: &str) -> DeliveryInformation {
    DeliveryInformation {
        expected_delivery_time: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        delivery_type: DeliveryType::Delivery,
        awb_id: awb.to_string(),
        delivery_location: DeliveryLocation::new("Madhapur", Coordinate::new(17.4483, 78.3915)),
    }
}

/// Real DeliveryTask actor with a mocked Item actor behind it.
/// `on_create` looks every item up through the injected `ItemClient`.
#[tokio::test]
async fn test_delivery_actor_verifies_items() {
    let mut item_mock = MockClient::<Item>::new();
    item_mock.expect_get(ItemId(1)).return_ok(Some(item(1)));
    item_mock.expect_get(ItemId(2)).return_ok(None);

    let item_client = ItemClient::new(item_mock.client());
    let (delivery_actor, delivery_client) = warehouse_dispatch::delivery_actor::new(8);
    let actor_handle = tokio::spawn(delivery_actor.run(item_client));

    let id = delivery_client
        .create_task(DeliveryTaskCreate {
            item_ids: vec![ItemId(1)],
            delivery_information: info("AWB-1"),
        })
        .await
        .expect("Task creation failed");
    let task = delivery_client.require(id).await.unwrap();
    assert_eq!(task.status, DeliveryStatus::Undispatched);
    assert_eq!(task.rider, None);

    let result = delivery_client
        .create_task(DeliveryTaskCreate {
            item_ids: vec![ItemId(2)],
            delivery_information: info("AWB-2"),
        })
        .await;
    assert_eq!(result, Err(DeliveryError::UnknownItem(ItemId(2))));

    let result = delivery_client
        .create_task(DeliveryTaskCreate {
            item_ids: Vec::new(),
            delivery_information: info("AWB-3"),
        })
        .await;
    assert_eq!(result, Err(DeliveryError::NoItems));
    assert_eq!(delivery_client.list().await.unwrap().len(), 1);

    item_mock.verify();

    drop(delivery_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_dispatch_transitions_and_locks() {
    let mut item_mock = MockClient::<Item>::new();
    item_mock.expect_get(ItemId(1)).return_ok(Some(item(1)));

    let (delivery_actor, delivery_client): (_, DeliveryClient) = warehouse_dispatch::delivery_actor::new(8);
    let actor_handle = tokio::spawn(delivery_actor.run(ItemClient::new(item_mock.client())));

    let id = delivery_client
        .create_task(DeliveryTaskCreate {
            item_ids: vec![ItemId(1)],
            delivery_information: info("AWB-1"),
        })
        .await
        .unwrap();

    // A rider can only be confirmed on a task that is being dispatched.
    assert!(matches!(
        delivery_client.confirm_dispatch(id, RiderId(1)).await,
        Err(DeliveryError::InvalidTransition {
            from: DeliveryStatus::Undispatched,
            to: DeliveryStatus::Dispatched,
            ..
        })
    ));

    delivery_client.begin_dispatch(id).await.unwrap();
    let locked = delivery_client
        .update_task(
            id,
            DeliveryTaskUpdate {
                delivery_information: Some(info("AWB-CHANGED")),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(
        locked,
        Err(DeliveryError::Locked {
            task: id,
            status: DeliveryStatus::Dispatching
        })
    );

    let aborted = delivery_client.abort_dispatch(id).await.unwrap();
    assert_eq!(aborted.status, DeliveryStatus::Undispatched);

    delivery_client.begin_dispatch(id).await.unwrap();
    let dispatched = delivery_client.confirm_dispatch(id, RiderId(3)).await.unwrap();
    assert_eq!(dispatched.status, DeliveryStatus::Dispatched);
    assert_eq!(dispatched.rider, Some(RiderId(3)));
    assert_eq!(delivery_client.list_for_rider(RiderId(3)).await.unwrap().len(), 1);

    assert!(matches!(
        delivery_client.delete(id).await,
        Err(DeliveryError::Locked { .. })
    ));

    delivery_client
        .update_status(id, DeliveryStatus::InProgress)
        .await
        .unwrap();
    assert!(matches!(
        delivery_client.update_status(id, DeliveryStatus::Dispatched).await,
        Err(DeliveryError::InvalidTransition { .. })
    ));
    let completed = delivery_client
        .update_status(id, DeliveryStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, DeliveryStatus::Completed);
    assert!(delivery_client.list_for_rider(RiderId(3)).await.unwrap().is_empty());

    item_mock.verify();

    drop(delivery_client);
    actor_handle.await.unwrap();
}
