//! Morning dispatch: assign undispatched deliveries to riders.
//!
//! Every delivery starts in the warehouse, so a rider's bag must hold all of its tasks
//! at once. Tasks are taken in earliest-deadline order; each goes to the rider who can
//! reach it soonest from their last stop among those with room left in the bag (ties go
//! to the rider listed first). A task no rider has room for stays unassigned.

use crate::algorithm::distance::TravelTimes;
use crate::algorithm::PlanningError;
use crate::model::{Coordinate, DeliveryTaskDetail, DeliveryTaskId, Rider, RiderId};
use chrono::{DateTime, Utc};
use std::iter;

/// A delivery as the planner sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchStop {
    pub task: DeliveryTaskId,
    pub location: Coordinate,
    pub volume: f64,
    pub expected_time: DateTime<Utc>,
}

impl DispatchStop {
    /// Requires exactly one scanned item with positive volume, due after `day_start`.
    pub fn from_detail(detail: &DeliveryTaskDetail, day_start: DateTime<Utc>) -> Result<Self, PlanningError> {
        let task = detail.id();
        let [item] = detail.items.as_slice() else {
            return Err(PlanningError::ItemCount {
                task,
                count: detail.items.len(),
            });
        };
        let volume = item.volume().ok_or(PlanningError::NotScanned(task))?;
        if !(volume.is_finite() && volume > 0.0) {
            return Err(PlanningError::InvalidVolume { task, volume });
        }

        let expected = detail.task.delivery_information.expected_delivery_time;
        if expected <= day_start {
            return Err(PlanningError::BeforeDayStart {
                task,
                expected,
                day_start,
            });
        }

        let location = detail.stop_location().ok_or(PlanningError::MissingLocation(task))?;
        Ok(Self {
            task,
            location: location.coordinate,
            volume,
            expected_time: expected,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRider {
    pub rider: RiderId,
    pub bag_volume: f64,
}

impl DispatchRider {
    pub fn from_rider(rider: &Rider) -> Result<Self, PlanningError> {
        if !(rider.bag_volume.is_finite() && rider.bag_volume > 0.0) {
            return Err(PlanningError::InvalidBagVolume {
                rider: rider.id,
                volume: rider.bag_volume,
            });
        }
        Ok(Self {
            rider: rider.id,
            bag_volume: rider.bag_volume,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DispatchProblem {
    pub warehouse: Coordinate,
    pub speed_kmh: f64,
    pub stops: Vec<DispatchStop>,
    pub riders: Vec<DispatchRider>,
}

/// One rider's stops, in visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct RiderRoute {
    pub rider: RiderId,
    pub tasks: Vec<DeliveryTaskId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispatchPlan {
    /// Only riders that received at least one task, in input order.
    pub routes: Vec<RiderRoute>,
    pub unassigned: Vec<DeliveryTaskId>,
}

struct RiderState {
    /// Node index in the travel-time matrix; 0 is the warehouse.
    position: usize,
    elapsed_secs: u64,
    free_volume: f64,
    visits: Vec<DeliveryTaskId>,
}

pub fn plan_dispatch(problem: &DispatchProblem) -> DispatchPlan {
    let points: Vec<Coordinate> = iter::once(problem.warehouse)
        .chain(problem.stops.iter().map(|stop| stop.location))
        .collect();
    let times = TravelTimes::between(&points, problem.speed_kmh);

    let mut order: Vec<usize> = (0..problem.stops.len()).collect();
    order.sort_by_key(|&i| (problem.stops[i].expected_time, i));

    let mut riders: Vec<RiderState> = problem
        .riders
        .iter()
        .map(|rider| RiderState {
            position: 0,
            elapsed_secs: 0,
            free_volume: rider.bag_volume,
            visits: Vec::new(),
        })
        .collect();
    let mut unassigned = Vec::new();

    for i in order {
        let stop = &problem.stops[i];
        let node = i + 1;

        let chosen = riders
            .iter()
            .enumerate()
            .filter(|(_, rider)| rider.free_volume >= stop.volume)
            .min_by_key(|(index, rider)| (rider.elapsed_secs + times.get(rider.position, node), *index))
            .map(|(index, _)| index);

        match chosen {
            Some(index) => {
                let rider = &mut riders[index];
                rider.elapsed_secs += times.get(rider.position, node);
                rider.position = node;
                rider.free_volume -= stop.volume;
                rider.visits.push(stop.task);
            }
            None => unassigned.push(stop.task),
        }
    }

    let routes = problem
        .riders
        .iter()
        .zip(riders)
        .filter(|(_, state)| !state.visits.is_empty())
        .map(|(rider, state)| RiderRoute {
            rider: rider.rider,
            tasks: state.visits,
        })
        .collect();

    DispatchPlan { routes, unassigned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const WAREHOUSE: Coordinate = Coordinate {
        latitude: 17.405991509704737,
        longitude: 78.40374949215402,
    };

    fn stop(task: u32, lat_offset: f64, volume: f64, hour: u32) -> DispatchStop {
        DispatchStop {
            task: DeliveryTaskId(task),
            location: Coordinate::new(WAREHOUSE.latitude + lat_offset, WAREHOUSE.longitude),
            volume,
            expected_time: Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    fn rider(id: u32, bag_volume: f64) -> DispatchRider {
        DispatchRider {
            rider: RiderId(id),
            bag_volume,
        }
    }

    fn problem(stops: Vec<DispatchStop>, riders: Vec<DispatchRider>) -> DispatchProblem {
        DispatchProblem {
            warehouse: WAREHOUSE,
            speed_kmh: 22.0,
            stops,
            riders,
        }
    }

    #[test]
    fn test_single_rider_visits_in_deadline_order() {
        let plan = plan_dispatch(&problem(
            vec![stop(1, 0.02, 1.0, 12), stop(2, 0.01, 1.0, 9), stop(3, 0.03, 1.0, 10)],
            vec![rider(1, 10.0)],
        ));
        assert_eq!(
            plan.routes,
            vec![RiderRoute {
                rider: RiderId(1),
                tasks: vec![DeliveryTaskId(2), DeliveryTaskId(3), DeliveryTaskId(1)],
            }]
        );
        assert!(plan.unassigned.is_empty());
    }

    #[test]
    fn test_second_task_goes_to_idle_rider() {
        // Both riders start at the warehouse; after rider 1 takes the first task, rider 2
        // reaches the second one sooner.
        let plan = plan_dispatch(&problem(
            vec![stop(1, 0.05, 1.0, 9), stop(2, -0.05, 1.0, 10)],
            vec![rider(1, 10.0), rider(2, 10.0)],
        ));
        assert_eq!(plan.routes.len(), 2);
        assert_eq!(plan.routes[0].tasks, vec![DeliveryTaskId(1)]);
        assert_eq!(plan.routes[1].tasks, vec![DeliveryTaskId(2)]);
    }

    #[test]
    fn test_bag_capacity_limits_assignment() {
        let plan = plan_dispatch(&problem(
            vec![stop(1, 0.01, 6.0, 9), stop(2, 0.02, 6.0, 10), stop(3, 0.03, 20.0, 11)],
            vec![rider(1, 10.0)],
        ));
        assert_eq!(plan.routes[0].tasks, vec![DeliveryTaskId(1)]);
        assert_eq!(plan.unassigned, vec![DeliveryTaskId(2), DeliveryTaskId(3)]);
    }

    #[test]
    fn test_riders_without_tasks_get_no_route() {
        let plan = plan_dispatch(&problem(vec![stop(1, 0.01, 1.0, 9)], vec![rider(1, 5.0), rider(2, 5.0)]));
        assert_eq!(plan.routes.len(), 1);
        assert_eq!(plan.routes[0].rider, RiderId(1));
    }

    #[test]
    fn test_rider_with_empty_bag_is_invalid() {
        let rider = Rider {
            id: RiderId(4),
            name: "Asha".into(),
            age: 30,
            bag_volume: 0.0,
            phone_number: "1".into(),
        };
        assert_eq!(
            DispatchRider::from_rider(&rider),
            Err(PlanningError::InvalidBagVolume {
                rider: RiderId(4),
                volume: 0.0
            })
        );
    }
}
