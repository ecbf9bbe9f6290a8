//! # Rider Client
//!
//! Provides a high-level API for interacting with the `Rider` actor.
use crate::clients::into_resource_error;
use crate::model::{Rider, RiderCreate, RiderId, RiderUpdate};
use crate::rider_actor::RiderError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Rider actor.
#[derive(Clone)]
pub struct RiderClient {
    inner: ResourceClient<Rider>,
}

impl RiderClient {
    pub fn new(inner: ResourceClient<Rider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Rider> for RiderClient {
    type Error = RiderError;

    fn inner(&self) -> &ResourceClient<Rider> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        into_resource_error(e, RiderError::NotFound)
    }
}

impl RiderClient {
    #[instrument(skip(self))]
    pub async fn create_rider(&self, params: RiderCreate) -> Result<RiderId, RiderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_rider(&self, id: RiderId, update: RiderUpdate) -> Result<Rider, RiderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Fetches a rider that must exist.
    pub async fn require(&self, id: RiderId) -> Result<Rider, RiderError> {
        self.get(id)
            .await?
            .ok_or_else(|| RiderError::NotFound(id.to_string()))
    }
}
