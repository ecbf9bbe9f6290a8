//! # Batch Display
//!
//! What the rider and monitor screens show for one batch: tasks ranked by order key, an
//! alert when the ranked tasks contradict the current task index, the leg the rider is
//! on, task cards, and status counts.
//!
//! A batch that fails the order check still renders its counts, but has no current
//! task, no route and no cards; the alert replaces them.

use crate::batch_actor::{check_task_order, rank_by_order_key};
use crate::dto::{DeliveryTaskView, DeliveryTasksBatchView, RouteSegmentView};
use crate::model::{DeliveryLocation, DeliveryType};
use crate::status::DeliveryStatus;
use chrono::{DateTime, Utc};

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// The message to show for a failed request: its detail, or a generic fallback.
pub fn alert_message(detail: Option<&str>) -> String {
    match detail.map(str::trim) {
        Some(detail) if !detail.is_empty() => detail.to_string(),
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

/// Badge text for a status: `in_progress` shows as `IN PROGRESS`.
pub fn status_label(status: DeliveryStatus) -> String {
    status.name().replacen('_', " ", 1).to_uppercase()
}

/// The leg from the previous stop (or the warehouse) to the current task.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub origin: DeliveryLocation,
    pub destination: Option<DeliveryLocation>,
    /// Segments stored on the current task when it was routed; empty if it never was.
    pub segments: Vec<RouteSegmentView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub dispatched: usize,
    pub in_progress: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub id: String,
    pub awb_id: String,
    pub delivery_type: DeliveryType,
    pub address: Option<String>,
    pub expected_delivery_time: DateTime<Utc>,
    pub status_label: String,
    pub badge_color: &'static str,
    pub next_action: &'static str,
    /// Cards other than the current task are disabled when only the current one may be picked.
    pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct BatchDisplay {
    ranked: Vec<DeliveryTaskView>,
    current_task_index: usize,
    alert: Option<String>,
    warehouse: DeliveryLocation,
}

impl BatchDisplay {
    pub fn new(batch: &DeliveryTasksBatchView, warehouse: DeliveryLocation) -> Self {
        let ranked: Vec<_> = rank_by_order_key(batch.tasks.clone(), |task_ref| task_ref.order_key);
        let keyed: Vec<_> = ranked
            .iter()
            .map(|task_ref| (task_ref.order_key, task_ref.delivery_task.status))
            .collect();
        let alert = check_task_order(batch.current_task_index, &keyed)
            .err()
            .map(|e| e.to_string());

        Self {
            ranked: ranked.into_iter().map(|task_ref| task_ref.delivery_task).collect(),
            current_task_index: batch.current_task_index,
            alert,
            warehouse,
        }
    }

    /// Alert text when the batch is inconsistent.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn ranked_tasks(&self) -> &[DeliveryTaskView] {
        &self.ranked
    }

    pub fn current(&self) -> Option<&DeliveryTaskView> {
        if self.alert.is_some() {
            return None;
        }
        self.ranked.get(self.current_task_index)
    }

    pub fn previous(&self) -> Option<&DeliveryTaskView> {
        if self.alert.is_some() {
            return None;
        }
        self.current_task_index
            .checked_sub(1)
            .and_then(|index| self.ranked.get(index))
    }

    pub fn route(&self) -> Option<RouteLeg> {
        let current = self.current()?;
        let origin = match self.current_task_index {
            0 => Some(self.warehouse.clone()),
            _ => self.previous().and_then(DeliveryTaskView::location).cloned(),
        }?;
        Some(RouteLeg {
            origin,
            destination: current.location().cloned(),
            segments: current.delivery_route.clone(),
        })
    }

    pub fn counts(&self) -> StatusCounts {
        self.ranked
            .iter()
            .fold(StatusCounts { total: self.ranked.len(), ..Default::default() }, |mut counts, task| {
                match task.status {
                    DeliveryStatus::Dispatched => counts.dispatched += 1,
                    DeliveryStatus::InProgress => counts.in_progress += 1,
                    DeliveryStatus::Completed => counts.completed += 1,
                    _ => {}
                }
                counts
            })
    }

    /// Cards for every task that is not completed, in ranked order.
    pub fn cards(&self, only_current_selectable: bool) -> Vec<TaskCard> {
        if self.alert.is_some() {
            return Vec::new();
        }
        let current_id = self.current().map(|task| task.id.as_str());
        self.ranked
            .iter()
            .filter(|task| task.status != DeliveryStatus::Completed)
            .map(|task| TaskCard {
                id: task.id.clone(),
                awb_id: task.delivery_information.awb_id.clone(),
                delivery_type: task.delivery_information.delivery_type,
                address: task.location().map(|location| location.address.clone()),
                expected_delivery_time: task.delivery_information.expected_delivery_time,
                status_label: status_label(task.status),
                badge_color: task.status.color(),
                next_action: task.status.next_status_label(),
                disabled: only_current_selectable && Some(task.id.as_str()) != current_id,
            })
            .collect()
    }
}
