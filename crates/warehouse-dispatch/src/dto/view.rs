//! Console view models, serialised camelCase.

use crate::model::{Coordinate, DeliveryLocation, DeliveryType, ToolScanInformation};
use crate::status::DeliveryStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tool_scan_information: Option<ToolScanInformation>,
    pub item_location: Option<DeliveryLocation>,
    pub timestamp_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderView {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub bag_volume: f64,
    pub phone_number: String,
    pub assigned_delivery_task_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegmentView {
    pub start_location: Option<DeliveryLocation>,
    pub end_location: Option<DeliveryLocation>,
    pub distance: f64,
    pub time_taken: f64,
    pub instruction: String,
    pub polyline: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInformationView {
    pub expected_delivery_time: DateTime<Utc>,
    pub delivery_type: DeliveryType,
    pub awb_id: String,
    pub delivery_location: DeliveryLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTaskView {
    pub id: String,
    pub items: Vec<ItemView>,
    pub delivery_information: DeliveryInformationView,
    pub rider: Option<RiderView>,
    pub status: DeliveryStatus,
    pub delivery_route: Vec<RouteSegmentView>,
}

impl DeliveryTaskView {
    /// Where the rider goes: the first item's location for a pickup, the delivery
    /// location otherwise.
    pub fn location(&self) -> Option<&DeliveryLocation> {
        match self.delivery_information.delivery_type {
            DeliveryType::Pickup => self.items.first().and_then(|item| item.item_location.as_ref()),
            DeliveryType::Delivery => Some(&self.delivery_information.delivery_location),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTaskRefView {
    pub delivery_task: DeliveryTaskView,
    pub order_key: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTasksBatchView {
    pub id: String,
    pub rider: RiderView,
    pub date: NaiveDate,
    pub tasks: Vec<DeliveryTaskRefView>,
    pub current_task_index: usize,
    pub version: Option<u32>,
}
