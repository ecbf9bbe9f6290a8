//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each client returns its actor's own error type. Entity errors raised inside an actor
//! arrive boxed in [`FrameworkError::EntityError`] and are unboxed back to that type, so
//! callers can match on `DeliveryError::InvalidTransition` rather than on a message.

pub mod batch_client;
pub mod delivery_client;
pub mod item_client;
pub mod rider_client;

pub use batch_client::*;
pub use delivery_client::*;
pub use item_client::*;
pub use rider_client::*;

use resource_actor::FrameworkError;

/// Converts a framework error into the resource's error type `E`.
pub(crate) fn into_resource_error<E>(e: FrameworkError, not_found: impl FnOnce(String) -> E) -> E
where
    E: std::error::Error + From<String> + 'static,
{
    match e {
        FrameworkError::NotFound(id) => not_found(id),
        FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
            Ok(typed) => *typed,
            Err(other) => E::from(other.to_string()),
        },
        other => E::from(other.to_string()),
    }
}
