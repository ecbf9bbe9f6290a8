//! Wire-to-view adapters, domain-to-wire conversions, and request parsing.

use crate::algorithm::PickupAssignment;
use crate::dto::view::*;
use crate::dto::wire::*;
use crate::model::{
    DeliveryInformation, DeliveryTaskDetail, DeliveryTaskId, DeliveryTasksBatchDetail, DeliveryType, Item, ItemCreate,
    ParseIdError, Rider, RiderCreate, RiderId, RouteSegment, UnknownDeliveryType,
};
use crate::status::{DeliveryStatus, UnknownStatus};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdaptError {
    #[error(transparent)]
    Status(#[from] UnknownStatus),

    #[error(transparent)]
    DeliveryType(#[from] UnknownDeliveryType),

    #[error(transparent)]
    Id(#[from] ParseIdError),
}

// =============================================================================
// Wire -> view
// =============================================================================

pub fn item_adapter(item: ItemDto) -> ItemView {
    ItemView {
        id: item.id.unwrap_or_default(),
        name: item.name,
        description: item.description,
        tool_scan_information: item.tool_scan_information,
        item_location: item.item_location,
        timestamp_created: item.timestamp_created,
    }
}

pub fn rider_adapter(rider: RiderDto) -> RiderView {
    RiderView {
        id: rider.id.unwrap_or_default(),
        name: rider.name,
        age: rider.age,
        bag_volume: rider.bag_volume,
        phone_number: rider.phone_number,
        assigned_delivery_task_ids: rider.assigned_delivery_task_ids,
    }
}

pub fn route_segment_adapter(segment: RouteSegmentDto) -> RouteSegmentView {
    RouteSegmentView {
        start_location: segment.start_location,
        end_location: segment.end_location,
        distance: segment.distance,
        time_taken: segment.time_taken,
        instruction: segment.instruction,
        polyline: segment.polyline,
    }
}

pub fn delivery_information_adapter(info: DeliveryInformationDto) -> Result<DeliveryInformationView, AdaptError> {
    Ok(DeliveryInformationView {
        expected_delivery_time: info.expected_delivery_time,
        delivery_type: info.delivery_type.parse()?,
        awb_id: info.awb_id,
        delivery_location: info.delivery_location,
    })
}

/// Fails on an unknown status name or delivery type.
pub fn delivery_task_adapter(task: DeliveryTaskDto) -> Result<DeliveryTaskView, AdaptError> {
    Ok(DeliveryTaskView {
        id: task.id.unwrap_or_default(),
        items: task.items.into_iter().map(item_adapter).collect(),
        delivery_information: delivery_information_adapter(task.delivery_information)?,
        rider: task.rider.map(rider_adapter),
        status: task.status.parse()?,
        delivery_route: task
            .delivery_route
            .into_iter()
            .map(route_segment_adapter)
            .collect(),
    })
}

pub fn delivery_tasks_batch_adapter(batch: DeliveryTasksBatchDto) -> Result<DeliveryTasksBatchView, AdaptError> {
    let tasks = batch
        .tasks
        .into_iter()
        .map(|task_ref| {
            Ok(DeliveryTaskRefView {
                delivery_task: delivery_task_adapter(task_ref.delivery_task)?,
                order_key: task_ref.order_key,
            })
        })
        .collect::<Result<Vec<_>, AdaptError>>()?;

    Ok(DeliveryTasksBatchView {
        id: batch.id.unwrap_or_default(),
        rider: rider_adapter(batch.rider),
        date: batch.date,
        tasks,
        current_task_index: batch.current_task_index,
        version: batch.version,
    })
}

// =============================================================================
// Domain -> wire
// =============================================================================

impl From<&Item> for ItemDto {
    fn from(item: &Item) -> Self {
        Self {
            id: Some(item.id.to_string()),
            name: item.name.clone(),
            description: item.description.clone(),
            tool_scan_information: item.tool_scan_information.clone(),
            item_location: item.item_location.clone(),
            timestamp_created: item.timestamp_created,
        }
    }
}

impl From<&Rider> for RiderDto {
    fn from(rider: &Rider) -> Self {
        Self {
            id: Some(rider.id.to_string()),
            name: rider.name.clone(),
            age: rider.age,
            bag_volume: rider.bag_volume,
            phone_number: rider.phone_number.clone(),
            assigned_delivery_task_ids: None,
        }
    }
}

impl From<&RouteSegment> for RouteSegmentDto {
    fn from(segment: &RouteSegment) -> Self {
        Self {
            start_location: None,
            end_location: None,
            distance: segment.distance,
            time_taken: segment.time_taken,
            instruction: segment.instruction.clone(),
            polyline: segment.polyline.clone(),
        }
    }
}

impl From<&DeliveryInformation> for DeliveryInformationDto {
    fn from(info: &DeliveryInformation) -> Self {
        Self {
            expected_delivery_time: info.expected_delivery_time,
            delivery_type: info.delivery_type.to_string(),
            awb_id: info.awb_id.clone(),
            delivery_location: info.delivery_location.clone(),
        }
    }
}

impl From<&DeliveryTaskDetail> for DeliveryTaskDto {
    fn from(detail: &DeliveryTaskDetail) -> Self {
        Self {
            id: Some(detail.task.id.to_string()),
            items: detail.items.iter().map(ItemDto::from).collect(),
            delivery_information: DeliveryInformationDto::from(&detail.task.delivery_information),
            rider: detail.rider.as_ref().map(RiderDto::from),
            status: detail.task.status.name().to_string(),
            delivery_route: detail
                .task
                .delivery_route
                .iter()
                .map(RouteSegmentDto::from)
                .collect(),
        }
    }
}

impl From<&DeliveryTasksBatchDetail> for DeliveryTasksBatchDto {
    fn from(detail: &DeliveryTasksBatchDetail) -> Self {
        let mut rider = RiderDto::from(&detail.rider);
        rider.assigned_delivery_task_ids = Some(detail.batch.task_ids().map(|id| id.to_string()).collect());

        Self {
            id: Some(detail.batch.id.to_string()),
            rider,
            date: detail.batch.date,
            tasks: detail
                .batch
                .tasks
                .iter()
                .zip(&detail.tasks)
                .map(|(task_ref, task)| DeliveryTaskRefDto {
                    delivery_task: DeliveryTaskDto::from(task),
                    order_key: task_ref.order_key,
                })
                .collect(),
            current_task_index: detail.batch.current_task_index,
            version: Some(detail.batch.version),
        }
    }
}

impl From<&PickupAssignment> for PickupDeliveryBatchAssignmentDto {
    fn from(assignment: &PickupAssignment) -> Self {
        Self {
            assigned_delivery_tasks_batch_id: Some(assignment.batch.to_string()),
            after_task_index: Some(assignment.after_task_index),
        }
    }
}

// =============================================================================
// Requests -> domain
// =============================================================================

impl From<CreateRiderDto> for RiderCreate {
    fn from(dto: CreateRiderDto) -> Self {
        Self {
            name: dto.name,
            age: dto.age,
            bag_volume: dto.bag_volume,
            phone_number: dto.phone_number,
        }
    }
}

impl TryFrom<DeliveryInformationDto> for DeliveryInformation {
    type Error = AdaptError;

    fn try_from(dto: DeliveryInformationDto) -> Result<Self, Self::Error> {
        Ok(Self {
            expected_delivery_time: dto.expected_delivery_time,
            delivery_type: dto.delivery_type.parse::<DeliveryType>()?,
            awb_id: dto.awb_id,
            delivery_location: dto.delivery_location,
        })
    }
}

impl CreateItemAndDeliveryTaskDto {
    /// Scan data in the request is ignored; items are scanned at the warehouse.
    pub fn into_domain(self) -> Result<(ItemCreate, DeliveryInformation), AdaptError> {
        let item = ItemCreate {
            name: self.item.name,
            description: self.item.description,
            item_location: self.item.item_location,
        };
        Ok((item, self.delivery_information.try_into()?))
    }
}

impl DispatchDeliveryTasksDto {
    pub fn parse_ids(&self) -> Result<(Vec<DeliveryTaskId>, Vec<RiderId>), AdaptError> {
        let tasks = self
            .delivery_task_ids
            .iter()
            .map(|id| id.parse::<DeliveryTaskId>())
            .collect::<Result<Vec<_>, _>>()?;
        let riders = self
            .rider_ids
            .iter()
            .map(|id| id.parse::<RiderId>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok((tasks, riders))
    }
}

impl UpdateDeliveryTaskStatusDto {
    pub fn status(&self) -> Result<DeliveryStatus, UnknownStatus> {
        self.status_name.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_json(status: &str) -> serde_json::Value {
        json!({
            "_id": "delivery_7",
            "items": [{
                "_id": "item_3",
                "name": "Kettle",
                "description": "Electric kettle",
                "tool_scan_information": {
                    "volume": 4.0,
                    "weight": 1.2,
                    "timestamp": "2025-03-01T05:00:00Z"
                },
                "timestamp_created": "2025-03-01T04:00:00Z"
            }],
            "delivery_information": {
                "expected_delivery_time": "2025-03-01T09:00:00Z",
                "delivery_type": "delivery",
                "awb_id": "AWB-7",
                "delivery_location": {
                    "address": "Madhapur",
                    "coordinate": { "latitude": 17.44, "longitude": 78.39 }
                }
            },
            "rider": {
                "_id": "rider_1",
                "name": "Ravi",
                "age": 27,
                "bag_volume": 40.0,
                "phone_number": "+91-90000-00001"
            },
            "status": status,
            "delivery_route": [{
                "start_location": {
                    "address": "Warehouse",
                    "coordinate": { "latitude": 17.40, "longitude": 78.40 }
                },
                "distance": 4500.0,
                "time_taken": 736.0,
                "instruction": "Head north",
                "polyline": [{ "latitude": 17.40, "longitude": 78.40 }]
            }]
        })
    }

    #[test]
    fn test_delivery_task_adapter_renames_fields() {
        let dto: DeliveryTaskDto = serde_json::from_value(task_json("in_progress")).unwrap();
        let view = delivery_task_adapter(dto).unwrap();

        assert_eq!(view.id, "delivery_7");
        assert_eq!(view.status, DeliveryStatus::InProgress);
        assert_eq!(view.items[0].tool_scan_information.as_ref().unwrap().volume, 4.0);
        assert_eq!(view.rider.as_ref().unwrap().bag_volume, 40.0);
        assert_eq!(view.delivery_route[0].start_location.as_ref().unwrap().address, "Warehouse");
        assert!(view.delivery_route[0].end_location.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["deliveryInformation"]["awbId"], "AWB-7");
        assert_eq!(json["deliveryInformation"]["deliveryType"], "delivery");
        assert_eq!(json["items"][0]["timestampCreated"], "2025-03-01T04:00:00Z");
        assert_eq!(json["rider"]["phoneNumber"], "+91-90000-00001");
        assert_eq!(json["deliveryRoute"][0]["timeTaken"], 736.0);
    }

    #[test]
    fn test_unknown_status_fails_adaptation() {
        let dto: DeliveryTaskDto = serde_json::from_value(task_json("lost")).unwrap();
        assert_eq!(
            delivery_task_adapter(dto).unwrap_err(),
            AdaptError::Status(UnknownStatus("lost".into()))
        );
    }

    #[test]
    fn test_missing_id_adapts_to_empty() {
        let dto: RiderDto = serde_json::from_value(json!({
            "name": "Meena",
            "age": 31,
            "bag_volume": 25.0,
            "phone_number": "5"
        }))
        .unwrap();
        let view = rider_adapter(dto);
        assert_eq!(view.id, "");
        assert_eq!(view.assigned_delivery_task_ids, None);
    }

    #[test]
    fn test_batch_adapter_keeps_order_keys() {
        let dto: DeliveryTasksBatchDto = serde_json::from_value(json!({
            "_id": "batch_2",
            "rider": {
                "_id": "rider_1",
                "name": "Ravi",
                "age": 27,
                "bag_volume": 40.0,
                "phone_number": "1"
            },
            "date": "2025-03-01",
            "tasks": [
                { "delivery_task": task_json("completed"), "order_key": 0.0 },
                { "delivery_task": task_json("dispatched"), "order_key": 0.5 }
            ],
            "current_task_index": 1
        }))
        .unwrap();

        let view = delivery_tasks_batch_adapter(dto).unwrap();
        assert_eq!(view.id, "batch_2");
        assert_eq!(view.version, None);
        assert_eq!(view.tasks[1].order_key, 0.5);
        assert_eq!(view.tasks[1].delivery_task.status, DeliveryStatus::Dispatched);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["currentTaskIndex"], 1);
        assert_eq!(json["tasks"][0]["orderKey"], 0.0);
    }

    #[test]
    fn test_requests_parse() {
        let dispatch: DispatchDeliveryTasksDto = serde_json::from_value(json!({
            "delivery_task_ids": ["delivery_1", "delivery_2"],
            "rider_ids": ["rider_4"]
        }))
        .unwrap();
        assert_eq!(
            dispatch.parse_ids().unwrap(),
            (vec![DeliveryTaskId(1), DeliveryTaskId(2)], vec![RiderId(4)])
        );

        let bad = DispatchDeliveryTasksDto {
            delivery_task_ids: vec!["rider_1".into()],
            rider_ids: Vec::new(),
        };
        assert!(matches!(bad.parse_ids(), Err(AdaptError::Id(_))));

        let update: UpdateDeliveryTaskStatusDto =
            serde_json::from_value(json!({ "status_name": "completed" })).unwrap();
        assert_eq!(update.status().unwrap(), DeliveryStatus::Completed);
    }

    #[test]
    fn test_pickup_assignment_serialises_snake_case() {
        let assignment = PickupAssignment {
            batch: crate::model::BatchId(3),
            rider: RiderId(1),
            after_task_index: 2,
            cost_secs: 120,
        };
        let json = serde_json::to_value(PickupDeliveryBatchAssignmentDto::from(&assignment)).unwrap();
        assert_eq!(
            json,
            json!({ "assigned_delivery_tasks_batch_id": "batch_3", "after_task_index": 2 })
        );
    }
}
