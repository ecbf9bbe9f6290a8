//! Entity trait implementation for the DeliveryTask domain type.

use crate::clients::ItemClient;
use crate::delivery_actor::{DeliveryAction, DeliveryError};
use crate::model::{DeliveryTask, DeliveryTaskCreate, DeliveryTaskId, DeliveryTaskUpdate};
use crate::status::DeliveryStatus;
use async_trait::async_trait;
use resource_actor::{ActorClient, ActorEntity};
use tracing::debug;

impl DeliveryTask {
    fn transition(&mut self, to: DeliveryStatus, allowed_from: DeliveryStatus) -> Result<(), DeliveryError> {
        if self.status != allowed_from {
            return Err(DeliveryError::InvalidTransition {
                task: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for DeliveryTask {
    type Id = DeliveryTaskId;
    type Create = DeliveryTaskCreate;
    type Update = DeliveryTaskUpdate;
    type Action = DeliveryAction;
    type ActionResult = DeliveryTask;
    type Context = ItemClient;
    type Error = DeliveryError;

    fn from_create_params(id: DeliveryTaskId, params: DeliveryTaskCreate) -> Result<Self, Self::Error> {
        if params.item_ids.is_empty() {
            return Err(DeliveryError::NoItems);
        }
        Ok(Self {
            id,
            item_ids: params.item_ids,
            delivery_information: params.delivery_information,
            rider: None,
            status: DeliveryStatus::Undispatched,
            delivery_route: Vec::new(),
        })
    }

    /// Checks that every referenced item exists.
    async fn on_create(&mut self, items: &ItemClient) -> Result<(), Self::Error> {
        for item_id in &self.item_ids {
            let found = items
                .get(*item_id)
                .await
                .map_err(DeliveryError::ItemLookup)?;
            if found.is_none() {
                return Err(DeliveryError::UnknownItem(*item_id));
            }
            debug!(task = %self.id, item = %item_id, "Item verified");
        }
        Ok(())
    }

    async fn on_update(&mut self, update: DeliveryTaskUpdate, _items: &ItemClient) -> Result<(), Self::Error> {
        if let Some(info) = update.delivery_information {
            if self.status != DeliveryStatus::Undispatched {
                return Err(DeliveryError::Locked {
                    task: self.id,
                    status: self.status,
                });
            }
            self.delivery_information = info;
        }
        if let Some(route) = update.delivery_route {
            self.delivery_route = route;
        }
        Ok(())
    }

    async fn on_delete(&self, _items: &ItemClient) -> Result<(), Self::Error> {
        match self.status {
            DeliveryStatus::Undispatched | DeliveryStatus::Completed | DeliveryStatus::Cancelled => Ok(()),
            status => Err(DeliveryError::Locked { task: self.id, status }),
        }
    }

    async fn handle_action(
        &mut self,
        action: DeliveryAction,
        _items: &ItemClient,
    ) -> Result<DeliveryTask, Self::Error> {
        match action {
            DeliveryAction::BeginDispatch => {
                self.transition(DeliveryStatus::Dispatching, DeliveryStatus::Undispatched)?;
            }
            DeliveryAction::ConfirmDispatch(rider) => {
                self.transition(DeliveryStatus::Dispatched, DeliveryStatus::Dispatching)?;
                self.rider = Some(rider);
            }
            DeliveryAction::AbortDispatch => {
                self.transition(DeliveryStatus::Undispatched, DeliveryStatus::Dispatching)?;
                self.rider = None;
            }
            DeliveryAction::RecallDispatch => {
                self.transition(DeliveryStatus::Undispatched, DeliveryStatus::Dispatched)?;
                self.rider = None;
                self.delivery_route.clear();
            }
            DeliveryAction::UpdateStatus(to) => {
                if !self.status.can_advance_to(to) {
                    return Err(DeliveryError::InvalidTransition {
                        task: self.id,
                        from: self.status,
                        to,
                    });
                }
                self.status = to;
            }
        }
        Ok(self.clone())
    }
}
