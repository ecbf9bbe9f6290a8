//! Dynamic pickup: slot a new pickup into one of today's running batches.
//!
//! For every batch with pending work (tasks from the current index that are not
//! completed) the planner tries inserting the pickup after each pending task. An
//! insertion is feasible if the rider's bag can hold the pickup from that point to the
//! end of the route: deliveries still aboard shrink the load as they are dropped,
//! collected pickups grow it. Among feasible insertions the planner picks the smallest
//!
//! ```text
//! detour seconds + added lateness seconds (over later stops and the pickup itself)
//! ```
//!
//! with ties going to the earlier batch, then the earlier position. Positions in the
//! result refer to the full batch, not to the pending slice.

use crate::algorithm::distance::TravelTimes;
use crate::algorithm::PlanningError;
use crate::model::{
    BatchId, Coordinate, DeliveryTaskDetail, DeliveryTaskId, DeliveryTasksBatchDetail, DeliveryType, RiderId,
};
use crate::status::DeliveryStatus;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// The pickup to place.
#[derive(Debug, Clone, PartialEq)]
pub struct PickupRequest {
    pub task: DeliveryTaskId,
    pub location: Coordinate,
    pub volume: f64,
    pub expected_time: DateTime<Utc>,
}

impl PickupRequest {
    pub fn from_detail(detail: &DeliveryTaskDetail) -> Result<Self, PlanningError> {
        let stop = PendingStop::from_detail(detail)?;
        Ok(Self {
            task: stop.task,
            location: stop.location,
            volume: stop.volume,
            expected_time: stop.expected_time,
        })
    }
}

/// A pending task of a running batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingStop {
    /// Position in the full batch.
    pub position: usize,
    pub task: DeliveryTaskId,
    pub location: Coordinate,
    pub volume: f64,
    pub expected_time: DateTime<Utc>,
    pub delivery_type: DeliveryType,
}

impl PendingStop {
    fn from_detail(detail: &DeliveryTaskDetail) -> Result<Self, PlanningError> {
        let task = detail.id();
        let location = detail.stop_location().ok_or(PlanningError::MissingLocation(task))?;
        let volume = detail.scanned_volume().ok_or(PlanningError::NotScanned(task))?;
        if !(volume.is_finite() && volume > 0.0) {
            return Err(PlanningError::InvalidVolume { task, volume });
        }
        Ok(Self {
            position: 0,
            task,
            location: location.coordinate,
            volume,
            expected_time: detail.task.delivery_information.expected_delivery_time,
            delivery_type: detail.task.delivery_type(),
        })
    }
}

/// A running batch reduced to what the planner needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PickupCandidate {
    pub batch: BatchId,
    pub rider: RiderId,
    pub bag_volume: f64,
    /// Where the rider is heading to the first pending stop from.
    pub origin: Coordinate,
    pub pending: Vec<PendingStop>,
}

impl PickupCandidate {
    /// The origin is the previous task's stop, or the warehouse at the start of the day.
    pub fn from_batch(detail: &DeliveryTasksBatchDetail, warehouse: Coordinate) -> Result<Self, PlanningError> {
        let pending = detail
            .pending()
            .map(|(position, task)| {
                let status = task.status();
                if !matches!(status, DeliveryStatus::Dispatched | DeliveryStatus::InProgress) {
                    return Err(PlanningError::PendingStatus {
                        task: task.id(),
                        status,
                    });
                }
                let stop = PendingStop::from_detail(task)?;
                Ok(PendingStop { position, ..stop })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let origin = match detail.previous() {
            Some(previous) => previous
                .stop_location()
                .map(|location| location.coordinate)
                .ok_or(PlanningError::MissingLocation(previous.id()))?,
            None => warehouse,
        };

        Ok(Self {
            batch: detail.batch.id,
            rider: detail.rider.id,
            bag_volume: detail.rider.bag_volume,
            origin,
            pending,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PickupProblem {
    pub pickup: PickupRequest,
    pub candidates: Vec<PickupCandidate>,
    pub now: DateTime<Utc>,
    pub speed_kmh: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickupAssignment {
    pub batch: BatchId,
    pub rider: RiderId,
    /// Insert directly after this position of the full batch.
    pub after_task_index: usize,
    pub cost_secs: i64,
}

/// Seconds past `expected` when arriving `arrival_secs` after `now`.
fn lateness(now: DateTime<Utc>, arrival_secs: i64, expected: DateTime<Utc>) -> i64 {
    (arrival_secs - (expected - now).num_seconds()).max(0)
}

/// Best insertion into one candidate as `(cost, pending index)`.
fn best_insertion(candidate: &PickupCandidate, problem: &PickupProblem) -> Option<(i64, usize)> {
    let stops = &candidate.pending;
    let n = stops.len();
    let pickup_node = n + 1;

    // nodes: 0 origin, 1..=n pending stops, n+1 pickup
    let points: Vec<Coordinate> = std::iter::once(candidate.origin)
        .chain(stops.iter().map(|s| s.location))
        .chain(std::iter::once(problem.pickup.location))
        .collect();
    let times = TravelTimes::between(&points, problem.speed_kmh);
    let t = |a: usize, b: usize| times.get(a, b) as i64;

    let mut arrival = Vec::with_capacity(n);
    let mut clock = 0;
    for k in 0..n {
        clock += t(k, k + 1);
        arrival.push(clock);
    }

    let mut load = stops
        .iter()
        .filter(|s| s.delivery_type == DeliveryType::Delivery)
        .map(|s| s.volume)
        .sum::<f64>();
    let mut load_after = Vec::with_capacity(n);
    for stop in stops {
        match stop.delivery_type {
            DeliveryType::Delivery => load -= stop.volume,
            DeliveryType::Pickup => load += stop.volume,
        }
        load_after.push(load);
    }

    let mut best: Option<(i64, usize)> = None;
    for k in 0..n {
        let peak = load_after[k..].iter().copied().fold(f64::MIN, f64::max);
        if peak + problem.pickup.volume > candidate.bag_volume {
            continue;
        }

        let node = k + 1;
        let detour = if k + 1 < n {
            (t(node, pickup_node) + t(pickup_node, node + 1) - t(node, node + 1)).max(0)
        } else {
            t(node, pickup_node)
        };

        let added_lateness: i64 = (k + 1..n)
            .map(|j| {
                let expected = stops[j].expected_time;
                lateness(problem.now, arrival[j] + detour, expected) - lateness(problem.now, arrival[j], expected)
            })
            .sum();
        let pickup_lateness = lateness(
            problem.now,
            arrival[k] + t(node, pickup_node),
            problem.pickup.expected_time,
        );

        let cost = detour + added_lateness + pickup_lateness;
        if best.map_or(true, |(best_cost, _)| cost < best_cost) {
            best = Some((cost, k));
        }
    }
    best
}

/// Chooses where the pickup goes, or `None` when no running batch can take it.
pub fn plan_pickup(problem: &PickupProblem) -> Result<Option<PickupAssignment>, PlanningError> {
    let mut riders = HashSet::new();
    for candidate in &problem.candidates {
        if !riders.insert(candidate.rider) {
            return Err(PlanningError::DuplicateRider(candidate.rider));
        }
    }

    let mut best: Option<PickupAssignment> = None;
    for candidate in problem.candidates.iter().filter(|c| !c.pending.is_empty()) {
        let Some((cost, k)) = best_insertion(candidate, problem) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| cost < b.cost_secs) {
            best = Some(PickupAssignment {
                batch: candidate.batch,
                rider: candidate.rider,
                after_task_index: candidate.pending[k].position,
                cost_secs: cost,
            });
        }
    }
    Ok(best)
}
