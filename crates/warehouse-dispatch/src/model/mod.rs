//! # Domain Model
//!
//! Plain data for the four warehouse resources and the value types they share. The
//! [`ActorEntity`](resource_actor::ActorEntity) implementations live next to each actor
//! (`item_actor::entity` and so on); this module holds no behaviour beyond small accessors.

pub mod batch;
pub mod common;
pub mod delivery;
pub mod detail;
pub mod item;
pub mod rider;

pub use batch::*;
pub use common::*;
pub use delivery::*;
pub use detail::*;
pub use item::*;
pub use rider::*;

/// Error returned when a wire id such as `"item_3"` cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {kind} id: {value:?}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a `u32` newtype id rendered as `"<prefix>_<n>"` on the wire.
macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.strip_prefix(concat!($prefix, "_"))
                    .and_then(|n| n.parse::<u32>().ok())
                    .map(Self)
                    .ok_or_else(|| ParseIdError {
                        kind: $prefix,
                        value: s.to_string(),
                    })
            }
        }
    };
}

resource_id!(
    /// Type-safe identifier for Items.
    ItemId,
    "item"
);
resource_id!(
    /// Type-safe identifier for Riders.
    RiderId,
    "rider"
);
resource_id!(
    /// Type-safe identifier for DeliveryTasks.
    DeliveryTaskId,
    "delivery"
);
resource_id!(
    /// Type-safe identifier for DeliveryTasksBatches.
    BatchId,
    "batch"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_render_and_parse_with_prefix() {
        assert_eq!(ItemId(3).to_string(), "item_3");
        assert_eq!("delivery_12".parse::<DeliveryTaskId>().unwrap(), DeliveryTaskId(12));
        assert_eq!("batch_1".parse::<BatchId>().unwrap(), BatchId(1));
    }

    #[test]
    fn test_id_with_wrong_prefix_is_rejected() {
        let err = "item_3".parse::<RiderId>().unwrap_err();
        assert_eq!(err.kind, "rider");
        assert_eq!(err.to_string(), "Invalid rider id: \"item_3\"");
        assert!("rider_".parse::<RiderId>().is_err());
        assert!("rider_x".parse::<RiderId>().is_err());
    }
}
