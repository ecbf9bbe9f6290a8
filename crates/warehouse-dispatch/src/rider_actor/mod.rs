//! # Rider Actor
//!
//! Owns the rider roster. Riders only support CRUD: the roster upload creates them, and
//! dispatch reads their bag volume when planning.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::RiderClient;
use crate::model::Rider;
use resource_actor::ResourceActor;

/// Riders have no custom actions.
#[derive(Debug, Clone)]
pub enum RiderAction {}

/// Creates a new Rider actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Rider>, RiderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, RiderClient::new(generic_client))
}
