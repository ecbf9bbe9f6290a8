/// A delivery rider.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait.
/// Riders have no custom actions; they are created from the roster upload and read by
/// dispatch.
use crate::model::RiderId;

#[derive(Debug, Clone, PartialEq)]
pub struct Rider {
    pub id: RiderId,
    pub name: String,
    pub age: u32,
    /// Bag capacity, in the same unit as scanned item volumes.
    pub bag_volume: f64,
    pub phone_number: String,
}

/// One roster row.
#[derive(Debug, Clone)]
pub struct RiderCreate {
    pub name: String,
    pub age: u32,
    pub bag_volume: f64,
    pub phone_number: String,
}

#[derive(Debug, Clone, Default)]
pub struct RiderUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub bag_volume: Option<f64>,
    pub phone_number: Option<String>,
}
