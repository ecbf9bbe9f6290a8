//! # Delivery Status
//!
//! The ranked lifecycle of a delivery task:
//!
//! ```text
//! undispatched(0) -> dispatching(1) -> dispatched(2) -> in_progress(3) -> completed(4) -> cancelled(5)
//! ```
//!
//! Status changes only move forward in rank. The helpers here (`next`, `color`,
//! `next_status_label`) feed the rider and monitor views.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Undispatched,
    Dispatching,
    Dispatched,
    InProgress,
    Completed,
    Cancelled,
}

/// Error for a status name outside the known set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown delivery status: {0:?}")]
pub struct UnknownStatus(pub String);

impl DeliveryStatus {
    const ALL: [DeliveryStatus; 6] = [
        DeliveryStatus::Undispatched,
        DeliveryStatus::Dispatching,
        DeliveryStatus::Dispatched,
        DeliveryStatus::InProgress,
        DeliveryStatus::Completed,
        DeliveryStatus::Cancelled,
    ];

    /// Every status, in rank order.
    pub fn values() -> &'static [DeliveryStatus] {
        &Self::ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeliveryStatus::Undispatched => "undispatched",
            DeliveryStatus::Dispatching => "dispatching",
            DeliveryStatus::Dispatched => "dispatched",
            DeliveryStatus::InProgress => "in_progress",
            DeliveryStatus::Completed => "completed",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DeliveryStatus::Undispatched => "The delivery is not dispatched yet",
            DeliveryStatus::Dispatching => "The delivery is being dispatched",
            DeliveryStatus::Dispatched => "The delivery is dispatched",
            DeliveryStatus::InProgress => "The delivery is in progress",
            DeliveryStatus::Completed => "The delivery is completed",
            DeliveryStatus::Cancelled => "The delivery is cancelled",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            DeliveryStatus::Undispatched => 0,
            DeliveryStatus::Dispatching => 1,
            DeliveryStatus::Dispatched => 2,
            DeliveryStatus::InProgress => 3,
            DeliveryStatus::Completed => 4,
            DeliveryStatus::Cancelled => 5,
        }
    }

    /// The status one rank above, or `None` after `cancelled`.
    pub fn next(&self) -> Option<DeliveryStatus> {
        Self::ALL.iter().copied().find(|s| s.rank() == self.rank() + 1)
    }

    /// Whether moving to `target` goes strictly forward in rank.
    pub fn can_advance_to(&self, target: DeliveryStatus) -> bool {
        target.rank() > self.rank()
    }

    /// Badge classes for the status chip.
    pub fn color(&self) -> &'static str {
        match self {
            DeliveryStatus::Dispatched => "bg-blue-100 text-blue-800 border-blue-200",
            DeliveryStatus::InProgress => "bg-purple-100 text-purple-800 border-purple-200",
            DeliveryStatus::Completed => "bg-green-100 text-green-800 border-green-200",
            _ => "bg-gray-100 text-gray-800 border-gray-200",
        }
    }

    /// Caption for the button that moves a task to its next status.
    pub fn next_status_label(&self) -> &'static str {
        match self {
            DeliveryStatus::Dispatched => "Start Delivery",
            DeliveryStatus::InProgress => "Mark Complete",
            _ => "Update to next status",
        }
    }
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeliveryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.name() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
