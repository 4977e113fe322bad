//! Route assembler.
//!
//! Delegates waypoint ordering and turn-by-turn detail to a
//! [`RouteGateway`] and folds the answer back onto the plan's stops. The
//! collaborator's visiting order is a permutation of the submitted stops;
//! stops keep their place and time window and are renumbered in visiting
//! order. Legs come out as one chain: stop to stop, preceded by the leg from
//! the origin to the first stop when the route is anchored at the origin.
//! A routed plan therefore has `len(stops)` legs from the origin and
//! `len(stops) - 1` otherwise.

use std::sync::Arc;

use jiff::civil::Time;
use log::{debug, warn};

use crate::{
    error::{PlannerError, Result},
    gateway::{LegDraft, RouteGateway, RouteSolution},
    geo::encode_polyline,
    models::{Coordinates, Leg, LegEndpoint, PlanStop, Route},
};

/// Route plus whether the collaborator produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub route: Route,
    /// `false` for the stops-only fallback
    pub route_available: bool,
}

#[derive(Clone)]
pub struct RouteAssembler {
    gateway: Arc<dyn RouteGateway>,
}

impl RouteAssembler {
    pub fn new(gateway: Arc<dyn RouteGateway>) -> Self {
        Self { gateway }
    }

    /// Routes `stops`, failing with [`PlannerError::RouteUnavailable`] when
    /// the collaborator errors, returns nothing or returns something that
    /// does not fit the stops.
    pub async fn try_assemble(
        &self,
        origin: Coordinates,
        start_time: Time,
        stops: Vec<PlanStop>,
    ) -> Result<Route> {
        if stops.is_empty() {
            return Err(PlannerError::RouteUnavailable {
                reason: "there are no stops to route".to_string(),
            });
        }

        debug!("requesting route for {} stops", stops.len());
        let solution = self
            .gateway
            .compute_route(origin, start_time, &stops)
            .await
            .map_err(|e| PlannerError::RouteUnavailable {
                reason: e.to_string(),
            })?
            .ok_or_else(|| PlannerError::RouteUnavailable {
                reason: "the routing service returned no routes".to_string(),
            })?;

        fold_solution(origin, stops, solution)
    }

    /// Routes `stops`, falling back to a stops-only route when routing is
    /// unavailable. Other failures are returned.
    pub async fn assemble(
        &self,
        origin: Coordinates,
        start_time: Time,
        stops: Vec<PlanStop>,
    ) -> Result<Assembly> {
        match self.try_assemble(origin, start_time, stops.clone()).await {
            Ok(route) => Ok(Assembly {
                route,
                route_available: true,
            }),
            Err(e) if e.is_degradation() => {
                warn!("{e}, keeping stops without legs");
                Ok(Assembly {
                    route: Route::stops_only(stops),
                    route_available: false,
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn to_leg(draft: LegDraft, start: LegEndpoint, end: LegEndpoint) -> Leg {
    Leg {
        distance_m: draft.distance_m,
        duration_s: draft.duration_s,
        polyline: draft.polyline,
        start,
        end,
        steps: draft.steps,
    }
}

/// Applies a collaborator's solution to the submitted stops.
pub fn fold_solution(
    origin: Coordinates,
    stops: Vec<PlanStop>,
    solution: RouteSolution,
) -> Result<Route> {
    let count = stops.len();
    let unavailable = |reason: String| PlannerError::RouteUnavailable { reason };

    let mut seen = vec![false; count];
    if solution.waypoint_order.len() != count {
        return Err(unavailable(format!(
            "visiting order has {} entries for {count} stops",
            solution.waypoint_order.len()
        )));
    }
    for &index in &solution.waypoint_order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(unavailable(format!(
                    "visiting order is not a permutation (index {index})"
                )));
            }
        }
    }
    let expected_legs = count.saturating_sub(1);
    if solution.legs.len() != expected_legs {
        return Err(unavailable(format!(
            "expected {expected_legs} legs between stops, got {}",
            solution.legs.len()
        )));
    }

    let mut slots: Vec<Option<PlanStop>> = stops.into_iter().map(Some).collect();
    let ordered: Vec<PlanStop> = solution
        .waypoint_order
        .iter()
        .enumerate()
        .filter_map(|(sequence, &index)| {
            slots[index].take().map(|mut stop| {
                stop.sequence = sequence as u32;
                stop
            })
        })
        .collect();

    let from_origin = solution.outbound.is_some();
    let mut legs = Vec::with_capacity(count);
    if let Some(outbound) = solution.outbound {
        legs.push(to_leg(outbound, LegEndpoint::Origin, LegEndpoint::Stop(0)));
    }
    legs.extend(solution.legs.into_iter().enumerate().map(|(i, draft)| {
        to_leg(
            draft,
            LegEndpoint::Stop(i as u32),
            LegEndpoint::Stop(i as u32 + 1),
        )
    }));

    let (mut total_distance_m, mut total_duration_s) =
        (solution.total_distance_m, solution.total_duration_s);
    if total_distance_m == 0 && total_duration_s == 0 {
        for leg in &legs {
            total_distance_m = total_distance_m.saturating_add(leg.distance_m);
            total_duration_s = total_duration_s.saturating_add(leg.duration_s);
        }
    }

    let polyline = if solution.polyline.is_empty() {
        let path: Vec<Coordinates> = from_origin
            .then_some(origin)
            .into_iter()
            .chain(ordered.iter().map(|s| s.place.coordinates()))
            .collect();
        encode_polyline(&path)
    } else {
        solution.polyline
    };

    Ok(Route {
        stops: ordered,
        legs,
        total_distance_m,
        total_duration_s,
        polyline,
    })
}
