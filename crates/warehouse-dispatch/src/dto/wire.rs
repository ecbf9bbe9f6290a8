//! REST payloads: snake_case fields, string ids under `_id`, status by name.

use crate::model::{Coordinate, DeliveryLocation, ToolScanInformation};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegmentDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<DeliveryLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<DeliveryLocation>,
    pub distance: f64,
    pub time_taken: f64,
    pub instruction: String,
    pub polyline: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryInformationDto {
    pub expected_delivery_time: DateTime<Utc>,
    /// `"delivery"` or `"pickup"`.
    pub delivery_type: String,
    pub awb_id: String,
    pub delivery_location: DeliveryLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDto {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_scan_information: Option<ToolScanInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_location: Option<DeliveryLocation>,
    pub timestamp_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItemDto {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_scan_information: Option<ToolScanInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_location: Option<DeliveryLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderDto {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub age: u32,
    pub bag_volume: f64,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_delivery_task_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRiderDto {
    pub name: String,
    pub age: u32,
    pub bag_volume: f64,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTaskDto {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub items: Vec<ItemDto>,
    pub delivery_information: DeliveryInformationDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rider: Option<RiderDto>,
    pub status: String,
    #[serde(default)]
    pub delivery_route: Vec<RouteSegmentDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTaskRefDto {
    pub delivery_task: DeliveryTaskDto,
    pub order_key: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTasksBatchDto {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub rider: RiderDto,
    pub date: NaiveDate,
    pub tasks: Vec<DeliveryTaskRefDto>,
    pub current_task_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

// Requests

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanDataDto {
    pub weight: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchDeliveryTasksDto {
    pub delivery_task_ids: Vec<String>,
    pub rider_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItemAndDeliveryTaskDto {
    pub item: CreateItemDto,
    pub delivery_information: DeliveryInformationDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDeliveryTaskStatusDto {
    pub status_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupDeliveryBatchAssignmentDto {
    pub assigned_delivery_tasks_batch_id: Option<String>,
    pub after_task_index: Option<usize>,
}
