/// An inventory item.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl ActorEntity for Item`](#impl-ActorEntity-for-Item) for details on:
/// - Creation parameters ([`ItemCreate`])
/// - Update parameters ([`ItemUpdate`])
/// - Custom actions ([`ItemAction`](crate::item_actor::ItemAction))
use crate::model::{DeliveryLocation, ItemId, ToolScanInformation};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub tool_scan_information: Option<ToolScanInformation>,
    pub item_location: Option<DeliveryLocation>,
    pub timestamp_created: DateTime<Utc>,
}

impl Item {
    pub fn is_scanned(&self) -> bool {
        self.tool_scan_information.is_some()
    }

    /// Scanned volume, if the item went through the scanner.
    pub fn volume(&self) -> Option<f64> {
        self.tool_scan_information.as_ref().map(|scan| scan.volume)
    }
}

/// Payload for creating an item. The creation timestamp comes from the actor's clock.
#[derive(Debug, Clone)]
pub struct ItemCreate {
    pub name: String,
    pub description: String,
    pub item_location: Option<DeliveryLocation>,
}

#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub item_location: Option<DeliveryLocation>,
}
