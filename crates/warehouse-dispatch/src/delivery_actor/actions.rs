//! Status actions for the DeliveryTask actor.
//!
//! Every action returns the task as stored afterwards.

use crate::model::RiderId;
use crate::status::DeliveryStatus;

#[derive(Debug, Clone)]
pub enum DeliveryAction {
    /// `undispatched -> dispatching`; the task is reserved for a running dispatch.
    BeginDispatch,
    /// `dispatching -> dispatched`, assigning the rider.
    ConfirmDispatch(RiderId),
    /// `dispatching -> undispatched`, clearing any rider.
    AbortDispatch,
    /// `dispatched -> undispatched`, clearing the rider and route. Used when the batch
    /// the task was confirmed into is discarded.
    RecallDispatch,
    /// Moves to any strictly higher-ranked status.
    UpdateStatus(DeliveryStatus),
}
