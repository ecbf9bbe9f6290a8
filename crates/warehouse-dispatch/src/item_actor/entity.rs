//! Entity trait implementation for the Item domain type.

use crate::clock::SharedClock;
use crate::item_actor::{ItemAction, ItemActionResult, ItemError};
use crate::model::{Item, ItemCreate, ItemId, ItemUpdate, ToolScanInformation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_actor::ActorEntity;

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[async_trait]
impl ActorEntity for Item {
    type Id = ItemId;
    type Create = ItemCreate;
    type Update = ItemUpdate;
    type Action = ItemAction;
    type ActionResult = ItemActionResult;
    type Context = SharedClock;
    type Error = ItemError;

    fn from_create_params(id: ItemId, params: ItemCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ItemError::EmptyName);
        }
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            tool_scan_information: None,
            item_location: params.item_location,
            // stamped in on_create
            timestamp_created: DateTime::<Utc>::default(),
        })
    }

    async fn on_create(&mut self, clock: &SharedClock) -> Result<(), Self::Error> {
        self.timestamp_created = clock.now();
        Ok(())
    }

    async fn on_update(&mut self, update: ItemUpdate, _clock: &SharedClock) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ItemError::EmptyName);
            }
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(location) = update.item_location {
            self.item_location = Some(location);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ItemAction,
        clock: &SharedClock,
    ) -> Result<ItemActionResult, Self::Error> {
        match action {
            ItemAction::Scan { weight, volume } => {
                if !is_positive(weight) || !is_positive(volume) {
                    return Err(ItemError::InvalidScan { weight, volume });
                }
                self.tool_scan_information = Some(ToolScanInformation {
                    volume,
                    weight,
                    timestamp: clock.now(),
                });
                Ok(ItemActionResult::Scan(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::sync::Arc;

    fn clock() -> SharedClock {
        let now = DateTime::parse_from_rfc3339("2025-03-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Arc::new(FixedClock::new(now))
    }

    fn item() -> Item {
        Item::from_create_params(
            ItemId(1),
            ItemCreate {
                name: "Lamp".into(),
                description: "Desk lamp".into(),
                item_location: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_on_create_stamps_clock_time() {
        let clock = clock();
        let mut item = item();
        item.on_create(&clock).await.unwrap();
        assert_eq!(item.timestamp_created, clock.now());
        assert!(!item.is_scanned());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = Item::from_create_params(
            ItemId(1),
            ItemCreate {
                name: "  ".into(),
                description: String::new(),
                item_location: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, ItemError::EmptyName);
    }

    #[tokio::test]
    async fn test_scan_rejects_non_positive_and_nan() {
        let clock = clock();
        let mut item = item();
        for (weight, volume) in [(0.0, 1.0), (1.0, -2.0), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
            let result = item
                .handle_action(ItemAction::Scan { weight, volume }, &clock)
                .await;
            assert!(matches!(result, Err(ItemError::InvalidScan { .. })));
        }
        assert!(item.tool_scan_information.is_none());
    }

    #[tokio::test]
    async fn test_rescan_overwrites() {
        let clock = clock();
        let mut item = item();
        item.handle_action(ItemAction::Scan { weight: 1.0, volume: 2.0 }, &clock)
            .await
            .unwrap();
        let ItemActionResult::Scan(scanned) = item
            .handle_action(ItemAction::Scan { weight: 3.0, volume: 4.0 }, &clock)
            .await
            .unwrap();
        assert_eq!(scanned.volume(), Some(4.0));
        assert_eq!(item.tool_scan_information.unwrap().weight, 3.0);
    }
}
