/// A delivery or pickup task.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait with the
/// item client as its context: a task can only be created for items that exist.
///
/// See [`impl ActorEntity for DeliveryTask`](#impl-ActorEntity-for-DeliveryTask) for the
/// status actions ([`DeliveryAction`](crate::delivery_actor::DeliveryAction)).
use crate::model::{DeliveryInformation, DeliveryTaskId, DeliveryType, ItemId, RiderId, RouteSegment};
use crate::status::DeliveryStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTask {
    pub id: DeliveryTaskId,
    pub item_ids: Vec<ItemId>,
    pub delivery_information: DeliveryInformation,
    pub rider: Option<RiderId>,
    pub status: DeliveryStatus,
    pub delivery_route: Vec<RouteSegment>,
}

impl DeliveryTask {
    pub fn delivery_type(&self) -> DeliveryType {
        self.delivery_information.delivery_type
    }

    pub fn is_pickup(&self) -> bool {
        self.delivery_type() == DeliveryType::Pickup
    }
}

/// Payload for creating a delivery task.
#[derive(Debug, Clone)]
pub struct DeliveryTaskCreate {
    pub item_ids: Vec<ItemId>,
    pub delivery_information: DeliveryInformation,
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryTaskUpdate {
    /// Only accepted while the task is still undispatched.
    pub delivery_information: Option<DeliveryInformation>,
    pub delivery_route: Option<Vec<RouteSegment>>,
}
