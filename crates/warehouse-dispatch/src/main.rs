//! # Warehouse Dispatch Demo
//!
//! Runs one operating day against in-process actors:
//! 1. Upload a rider roster and an inventory of deliveries.
//! 2. Scan every item.
//! 3. Dispatch the deliveries into per-rider batches.
//! 4. Walk the first rider through their first task.
//! 5. Slot a pickup into a running batch.
//!
//! `RUST_LOG=info cargo run` for the step log, `RUST_LOG=debug` for every actor message.

use chrono::{DateTime, TimeDelta, Utc};
use resource_actor::tracing::setup_tracing;
use std::sync::Arc;
use tracing::{error, info, Instrument};
use warehouse_dispatch::clock::{day_start, SystemClock, WarehouseClock};
use warehouse_dispatch::config::WarehouseConfig;
use warehouse_dispatch::display::BatchDisplay;
use warehouse_dispatch::dto::{delivery_tasks_batch_adapter, DeliveryTasksBatchDto};
use warehouse_dispatch::lifecycle::WarehouseSystem;
use warehouse_dispatch::model::{
    Coordinate, DeliveryInformation, DeliveryLocation, DeliveryType, ItemCreate, RiderCreate,
};

fn drop_point(address: &str, latitude: f64, longitude: f64) -> DeliveryLocation {
    DeliveryLocation::new(address, Coordinate::new(latitude, longitude))
}

fn delivery(awb: &str, location: DeliveryLocation, expected: DateTime<Utc>) -> DeliveryInformation {
    DeliveryInformation {
        expected_delivery_time: expected,
        delivery_type: DeliveryType::Delivery,
        awb_id: awb.to_string(),
        delivery_location: location,
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = WarehouseConfig::from_env().map_err(|e| e.to_string())?;
    let clock = Arc::new(SystemClock);
    let first_slot = clock.now().max(day_start(clock.today(), config.day_start)) + TimeDelta::hours(2);

    info!(warehouse = ?config.warehouse, "Starting warehouse dispatch demo");
    let system = WarehouseSystem::new(config, clock);
    let dispatch = &system.dispatch;

    let riders = async {
        dispatch
            .upload_riders(vec![
                RiderCreate {
                    name: "Ravi".into(),
                    age: 27,
                    bag_volume: 40.0,
                    phone_number: "+91-90000-00001".into(),
                },
                RiderCreate {
                    name: "Meena".into(),
                    age: 31,
                    bag_volume: 25.0,
                    phone_number: "+91-90000-00002".into(),
                },
            ])
            .await
            .map_err(|e| e.detail())
    }
    .instrument(tracing::info_span!("roster_upload"))
    .await?;

    let stops = [
        ("Madhapur", 17.4483, 78.3915, 6.0),
        ("Banjara Hills", 17.4126, 78.4482, 10.0),
        ("Kondapur", 17.4600, 78.3560, 8.0),
        ("Ameerpet", 17.4375, 78.4483, 12.0),
    ];
    let rows = stops
        .iter()
        .enumerate()
        .map(|(i, (address, lat, lng, _))| {
            (
                ItemCreate {
                    name: format!("Parcel {}", i + 1),
                    description: format!("Parcel for {address}"),
                    item_location: None,
                },
                delivery(
                    &format!("AWB-{:04}", i + 1),
                    drop_point(address, *lat, *lng),
                    first_slot + TimeDelta::minutes(30 * i as i64),
                ),
            )
        })
        .collect();

    let created = async { dispatch.upload_inventory(rows).await.map_err(|e| e.detail()) }
        .instrument(tracing::info_span!("inventory_upload"))
        .await?;

    for (row, (_, _, _, volume)) in created.iter().zip(stops.iter()) {
        dispatch
            .scan_item(row.item, volume / 4.0, *volume)
            .await
            .map_err(|e| e.detail())?;
    }

    let task_ids: Vec<_> = created.iter().map(|row| row.task).collect();
    let outcome = async {
        dispatch
            .dispatch_delivery_tasks(&task_ids, &riders)
            .await
            .map_err(|e| e.detail())
    }
    .instrument(tracing::info_span!("dispatch"))
    .await?;

    for batch in &outcome.batches {
        let tasks: Vec<String> = batch.task_ids().map(|id| id.to_string()).collect();
        info!(batch = %batch.id, rider = %batch.rider, ?tasks, "Batch ready");
    }

    let Some(first_batch) = outcome.batches.first() else {
        error!("Dispatch produced no batches");
        return system.shutdown().await;
    };
    let rider = first_batch.rider;

    let span = tracing::info_span!("rider_workflow", rider = %rider);
    async {
        let detail = dispatch.batch_for_rider(rider).await.map_err(|e| e.detail())?;
        if let Some(current) = detail.current() {
            let task = current.id();
            dispatch.advance_task_status(task).await.map_err(|e| e.detail())?;
            dispatch.advance_task_status(task).await.map_err(|e| e.detail())?;
            info!(task = %task, "First task completed");
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let pickup = dispatch
        .create_pickup_task(
            ItemCreate {
                name: "Return".into(),
                description: "Customer return".into(),
                item_location: None,
            },
            DeliveryInformation {
                delivery_type: DeliveryType::Pickup,
                ..delivery(
                    "AWB-RET-1",
                    drop_point("Jubilee Hills", 17.4300, 78.4100),
                    first_slot + TimeDelta::hours(3),
                )
            },
        )
        .await
        .map_err(|e| e.detail())?;
    dispatch
        .scan_item(pickup.item, 1.0, 3.0)
        .await
        .map_err(|e| e.detail())?;

    match dispatch.dispatch_pickup_tasks(&[pickup.task]).await {
        Ok(assignments) => {
            for assignment in assignments {
                info!(
                    batch = %assignment.batch,
                    after_task_index = assignment.after_task_index,
                    "Pickup slotted"
                );
            }
        }
        Err(e) => error!(error = %e.detail(), "Pickup could not be placed"),
    }

    let detail = dispatch.batch_for_rider(rider).await.map_err(|e| e.detail())?;
    let view = delivery_tasks_batch_adapter(DeliveryTasksBatchDto::from(&detail)).map_err(|e| e.to_string())?;
    let display = BatchDisplay::new(&view, DeliveryLocation::warehouse(system.config.warehouse));
    let counts = display.counts();
    info!(
        total = counts.total,
        completed = counts.completed,
        dispatched = counts.dispatched,
        "Rider batch summary"
    );
    if let Some(leg) = display.route() {
        info!(
            from = %leg.origin.address,
            to = ?leg.destination.map(|d| d.address),
            segments = leg.segments.len(),
            "Next leg"
        );
    }

    let overview = dispatch.list_tasks().await.map_err(|e| e.detail())?;
    for task in &overview {
        info!(
            task = %task.id(),
            status = task.task.status.name(),
            rider = ?task.rider.as_ref().map(|rider| rider.name.as_str()),
            "Task overview"
        );
    }

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
