//! Value types shared by several resources.
//!
//! Their field names are single words or already snake_case, so the same structs appear
//! unchanged in both the wire DTOs and the camelCase views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Address label used for the warehouse origin.
pub const WAREHOUSE_ADDRESS: &str = "Warehouse";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLocation {
    pub address: String,
    pub coordinate: Coordinate,
}

impl DeliveryLocation {
    pub fn new(address: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            address: address.into(),
            coordinate,
        }
    }

    /// The warehouse as a route origin.
    pub fn warehouse(coordinate: Coordinate) -> Self {
        Self::new(WAREHOUSE_ADDRESS, coordinate)
    }
}

/// Weight and volume recorded by the scanning tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolScanInformation {
    pub volume: f64,
    pub weight: f64,
    pub timestamp: DateTime<Utc>,
}

/// One leg of a rider's route. `distance` is in metres, `time_taken` in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub distance: f64,
    pub time_taken: f64,
    pub instruction: String,
    pub polyline: Vec<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    Delivery,
    Pickup,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Delivery => "delivery",
            DeliveryType::Pickup => "pickup",
        }
    }
}

impl Display for DeliveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a delivery type name other than `delivery` or `pickup`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown delivery type: {0:?}")]
pub struct UnknownDeliveryType(pub String);

impl FromStr for DeliveryType {
    type Err = UnknownDeliveryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(DeliveryType::Delivery),
            "pickup" => Ok(DeliveryType::Pickup),
            other => Err(UnknownDeliveryType(other.to_string())),
        }
    }
}

/// Where and when a task must be fulfilled.
///
/// For a pickup, `delivery_location` is where the collected item is taken; the rider goes
/// to the item's own location to collect it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryInformation {
    pub expected_delivery_time: DateTime<Utc>,
    pub delivery_type: DeliveryType,
    pub awb_id: String,
    pub delivery_location: DeliveryLocation,
}
