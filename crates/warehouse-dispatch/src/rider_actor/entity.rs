//! Entity trait implementation for the Rider domain type.

use crate::model::{Rider, RiderCreate, RiderId, RiderUpdate};
use crate::rider_actor::{RiderAction, RiderError};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn require(field: &'static str, value: &str) -> Result<(), RiderError> {
    if value.trim().is_empty() {
        return Err(RiderError::MissingField(field));
    }
    Ok(())
}

fn check_bag_volume(volume: f64) -> Result<(), RiderError> {
    if !volume.is_finite() || volume < 0.0 {
        return Err(RiderError::InvalidBagVolume(volume));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Rider {
    type Id = RiderId;
    type Create = RiderCreate;
    type Update = RiderUpdate;
    type Action = RiderAction;
    type ActionResult = ();
    type Context = ();
    type Error = RiderError;

    fn from_create_params(id: RiderId, params: RiderCreate) -> Result<Self, Self::Error> {
        require("name", &params.name)?;
        require("phone number", &params.phone_number)?;
        check_bag_volume(params.bag_volume)?;
        Ok(Self {
            id,
            name: params.name,
            age: params.age,
            bag_volume: params.bag_volume,
            phone_number: params.phone_number,
        })
    }

    /// Validates every provided field before applying any of them.
    async fn on_update(&mut self, update: RiderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            require("name", name)?;
        }
        if let Some(phone) = &update.phone_number {
            require("phone number", phone)?;
        }
        if let Some(volume) = update.bag_volume {
            check_bag_volume(volume)?;
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(volume) = update.bag_volume {
            self.bag_volume = volume;
        }
        if let Some(phone) = update.phone_number {
            self.phone_number = phone;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: RiderAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
