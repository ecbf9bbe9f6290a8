//! Straight-line travel estimates.
//!
//! Distances use the haversine great-circle formula. Travel time divides by an effective
//! rider speed (22 km/h by default) and truncates to whole seconds.

use crate::model::{Coordinate, DeliveryLocation, RouteSegment};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_KM
}

pub fn travel_secs(from: Coordinate, to: Coordinate, speed_kmh: f64) -> u64 {
    (haversine_km(from, to) / speed_kmh * 3600.0) as u64
}

/// Pairwise travel times over a fixed list of points.
#[derive(Debug, Clone)]
pub struct TravelTimes {
    secs: Vec<Vec<u64>>,
}

impl TravelTimes {
    pub fn between(points: &[Coordinate], speed_kmh: f64) -> Self {
        let secs = points
            .iter()
            .map(|from| {
                points
                    .iter()
                    .map(|to| travel_secs(*from, *to, speed_kmh))
                    .collect()
            })
            .collect();
        Self { secs }
    }

    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.secs[from][to]
    }
}

/// A single straight leg between two stops.
pub fn straight_segment(from: &DeliveryLocation, to: &DeliveryLocation, speed_kmh: f64) -> RouteSegment {
    RouteSegment {
        distance: haversine_km(from.coordinate, to.coordinate) * 1000.0,
        time_taken: travel_secs(from.coordinate, to.coordinate, speed_kmh) as f64,
        instruction: format!("Head from {} to {}", from.address, to.address),
        polyline: vec![from.coordinate, to.coordinate],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAREHOUSE: Coordinate = Coordinate {
        latitude: 17.405991509704737,
        longitude: 78.40374949215402,
    };

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_km(WAREHOUSE, WAREHOUSE), 0.0);
        assert_eq!(travel_secs(WAREHOUSE, WAREHOUSE, 22.0), 0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let north = Coordinate::new(WAREHOUSE.latitude + 1.0, WAREHOUSE.longitude);
        let km = haversine_km(WAREHOUSE, north);
        assert!((km - 111.19).abs() < 0.01, "got {km}");
        // 111.19 km at 22 km/h is about 5.05 hours
        assert_eq!(travel_secs(WAREHOUSE, north, 22.0), (km / 22.0 * 3600.0) as u64);
        assert!((18_190..18_200).contains(&travel_secs(WAREHOUSE, north, 22.0)));
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let points = [
            WAREHOUSE,
            Coordinate::new(17.44, 78.38),
            Coordinate::new(17.36, 78.47),
        ];
        let times = TravelTimes::between(&points, 22.0);
        for i in 0..3 {
            assert_eq!(times.get(i, i), 0);
            for j in 0..3 {
                assert_eq!(times.get(i, j), times.get(j, i));
            }
        }
    }

    #[test]
    fn test_segment_describes_leg() {
        let from = DeliveryLocation::warehouse(WAREHOUSE);
        let to = DeliveryLocation::new("Jubilee Hills", Coordinate::new(17.43, 78.41));
        let segment = straight_segment(&from, &to, 22.0);
        assert_eq!(segment.instruction, "Head from Warehouse to Jubilee Hills");
        assert_eq!(segment.polyline, vec![from.coordinate, to.coordinate]);
        assert!(segment.distance > 2_000.0 && segment.distance < 3_500.0);
    }
}
