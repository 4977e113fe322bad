//! Offline routing gateway.
//!
//! Orders stops with a nearest-neighbour tour from the origin, improves the
//! order with 2-opt, and walks straight lines between points. Distances are
//! great-circle distances scaled by a detour factor to approximate streets.
//!
//! By default the walk begins at the first stop and only the legs between
//! stops are returned. [`StraightLineRouter::with_origin_leg`] anchors the
//! walk at the origin, adding the leg from the origin to the first stop.

use async_trait::async_trait;
use jiff::civil::Time;
use log::debug;

use super::{GatewayResult, LegDraft, RouteGateway, RouteSolution};
use crate::{
    geo::{compass_direction, encode_polyline, haversine_km, initial_bearing_deg},
    models::{Coordinates, PlanStop, Step},
};

/// Average walking pace.
pub const DEFAULT_WALKING_SPEED_KMH: f64 = 4.8;

/// Street distance over straight-line distance.
pub const DEFAULT_DETOUR_FACTOR: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLineRouter {
    walking_speed_kmh: f64,
    detour_factor: f64,
    origin_leg: bool,
}

impl Default for StraightLineRouter {
    fn default() -> Self {
        Self {
            walking_speed_kmh: DEFAULT_WALKING_SPEED_KMH,
            detour_factor: DEFAULT_DETOUR_FACTOR,
            origin_leg: false,
        }
    }
}

impl StraightLineRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_walking_speed(mut self, kmh: f64) -> Self {
        if kmh.is_finite() && kmh > 0.0 {
            self.walking_speed_kmh = kmh;
        }
        self
    }

    pub fn with_detour_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor >= 1.0 {
            self.detour_factor = factor;
        }
        self
    }

    /// Starts the walk at the origin with a leg to the first stop.
    pub fn with_origin_leg(mut self, origin_leg: bool) -> Self {
        self.origin_leg = origin_leg;
        self
    }

    fn walking_m(&self, a: Coordinates, b: Coordinates) -> f64 {
        haversine_km(a, b) * self.detour_factor * 1000.0
    }

    fn leg(&self, from: Coordinates, to: Coordinates, to_name: &str) -> LegDraft {
        let distance = self.walking_m(from, to);
        let distance_m = distance.round() as u32;
        let duration_s = (distance / (self.walking_speed_kmh / 3.6)).round() as u32;
        let direction = compass_direction(initial_bearing_deg(from, to));
        LegDraft {
            distance_m,
            duration_s,
            polyline: encode_polyline(&[from, to]),
            steps: vec![Step {
                distance_m,
                duration_s,
                instruction: format!("Walk {distance_m} m {direction} to {to_name}"),
            }],
        }
    }

    /// Total walking distance of an open tour starting at `origin`. The
    /// approach from the origin counts in both modes so the tour starts near
    /// it.
    fn tour_length(&self, origin: Coordinates, points: &[Coordinates], order: &[usize]) -> f64 {
        let mut total = 0.0;
        let mut at = origin;
        for &i in order {
            total += self.walking_m(at, points[i]);
            at = points[i];
        }
        total
    }

    fn nearest_neighbour(&self, origin: Coordinates, points: &[Coordinates]) -> Vec<usize> {
        let mut remaining: Vec<usize> = (0..points.len()).collect();
        let mut order = Vec::with_capacity(points.len());
        let mut at = origin;
        while !remaining.is_empty() {
            let (pos, _) = remaining
                .iter()
                .enumerate()
                .map(|(pos, &i)| (pos, self.walking_m(at, points[i])))
                .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best });
            let next = remaining.remove(pos);
            at = points[next];
            order.push(next);
        }
        order
    }

    /// Reverses segments while that shortens the tour.
    fn two_opt(&self, origin: Coordinates, points: &[Coordinates], mut order: Vec<usize>) -> Vec<usize> {
        let mut best = self.tour_length(origin, points, &order);
        let mut improved = true;
        while improved {
            improved = false;
            for i in 0..order.len() {
                for j in (i + 1)..order.len() {
                    order[i..=j].reverse();
                    let candidate = self.tour_length(origin, points, &order);
                    if candidate + 1e-6 < best {
                        best = candidate;
                        improved = true;
                    } else {
                        order[i..=j].reverse();
                    }
                }
            }
        }
        order
    }
}

#[async_trait]
impl RouteGateway for StraightLineRouter {
    async fn compute_route(
        &self,
        origin: Coordinates,
        _start_time: Time,
        stops: &[PlanStop],
    ) -> GatewayResult<Option<RouteSolution>> {
        if stops.is_empty() {
            return Ok(None);
        }

        let points: Vec<Coordinates> = stops.iter().map(|s| s.place.coordinates()).collect();
        let order = self.two_opt(origin, &points, self.nearest_neighbour(origin, &points));

        let first = order[0];
        let outbound = self
            .origin_leg
            .then(|| self.leg(origin, points[first], &stops[first].place.name));
        let legs: Vec<LegDraft> = order
            .windows(2)
            .map(|pair| self.leg(points[pair[0]], points[pair[1]], &stops[pair[1]].place.name))
            .collect();

        let (total_distance_m, total_duration_s) = outbound
            .iter()
            .chain(&legs)
            .fold((0u32, 0u32), |(d, t), leg| {
                (d.saturating_add(leg.distance_m), t.saturating_add(leg.duration_s))
            });

        let mut path = Vec::with_capacity(order.len() + 1);
        if self.origin_leg {
            path.push(origin);
        }
        path.extend(order.iter().map(|&i| points[i]));

        debug!(
            "straight-line route over {} stops: {total_distance_m} m, {total_duration_s} s",
            stops.len()
        );

        Ok(Some(RouteSolution {
            waypoint_order: order,
            outbound,
            legs,
            total_distance_m,
            total_duration_s,
            polyline: encode_polyline(&path),
        }))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use super::*;
    use crate::models::{IndoorOutdoor, Place};

    fn stop(sequence: u32, name: &str, lat: f64, lon: f64) -> PlanStop {
        PlanStop {
            sequence,
            place: Place {
                id: name.to_lowercase(),
                name: name.to_string(),
                address: String::new(),
                lat,
                lon,
                distance_km: 0.0,
                indoor_outdoor: IndoorOutdoor::Mixed,
                categories: Vec::new(),
            },
            start_time: time(10, 0, 0, 0),
            end_time: time(11, 0, 0, 0),
        }
    }

    fn origin() -> Coordinates {
        Coordinates::new(50.0, 4.0)
    }

    #[tokio::test]
    async fn test_empty_stops_have_no_route() {
        let solution = StraightLineRouter::new()
            .compute_route(origin(), time(9, 0, 0, 0), &[])
            .await
            .unwrap();
        assert!(solution.is_none());
    }

    #[tokio::test]
    async fn test_orders_stops_along_a_line() {
        // submitted far-to-near; walking order should be near-to-far
        let stops = vec![
            stop(0, "Far", 50.03, 4.0),
            stop(1, "Near", 50.01, 4.0),
            stop(2, "Middle", 50.02, 4.0),
        ];
        let solution = StraightLineRouter::new()
            .compute_route(origin(), time(9, 0, 0, 0), &stops)
            .await
            .unwrap()
            .expect("route for three stops");

        assert_eq!(solution.waypoint_order, vec![1, 2, 0]);
        assert!(solution.outbound.is_none());
        assert_eq!(solution.legs.len(), 2);
        assert_eq!(solution.legs[0].steps.len(), 1);
        assert!(solution.legs[0].steps[0].instruction.contains("north to Middle"));
        assert!(!solution.polyline.is_empty());

        let legs_sum: u32 = solution.legs.iter().map(|l| l.distance_m).sum();
        assert_eq!(solution.total_distance_m, legs_sum);
    }

    #[tokio::test]
    async fn test_walking_speed_sets_duration() {
        let stops = vec![stop(0, "Only", 50.01, 4.0)];
        let solution = StraightLineRouter::new()
            .with_origin_leg(true)
            .with_detour_factor(1.0)
            .with_walking_speed(3.6)
            .compute_route(origin(), time(9, 0, 0, 0), &stops)
            .await
            .unwrap()
            .unwrap();
        let outbound = solution.outbound.unwrap();
        // 3.6 km/h is one metre per second
        assert!(outbound.distance_m.abs_diff(outbound.duration_s) <= 1);
        assert!((1100..1125).contains(&outbound.distance_m), "got {}", outbound.distance_m);
    }

    #[tokio::test]
    async fn test_origin_leg_adds_one_leg() {
        let stops = vec![stop(0, "A", 50.01, 4.0), stop(1, "B", 50.01, 4.01)];
        let solution = StraightLineRouter::new()
            .with_origin_leg(true)
            .compute_route(origin(), time(9, 0, 0, 0), &stops)
            .await
            .unwrap()
            .unwrap();

        let outbound = solution.outbound.as_ref().expect("origin leg");
        assert!(outbound.steps[0].instruction.contains("north to A"));
        assert_eq!(solution.legs.len(), 1);
        assert_eq!(
            solution.total_distance_m,
            outbound.distance_m + solution.legs[0].distance_m
        );
    }

    #[test]
    fn test_invalid_tuning_is_ignored() {
        let router = StraightLineRouter::new()
            .with_walking_speed(0.0)
            .with_detour_factor(0.5);
        assert_eq!(router, StraightLineRouter::default());
    }
}
