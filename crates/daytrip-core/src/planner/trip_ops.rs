//! Itinerary building, routing and regeneration for the Planner.

use jiff::civil::{Date, Time};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    itinerary::Itinerary,
    models::{CategorySelection, GeoLocation, Place, Plan, Route},
    params::{BuildTrip, Id, RegeneratePlan, SearchPlaces, parse_date, parse_time},
    ranking::RankedPlace,
};

/// Number of top ranked places taken when a trip names no picks.
pub const DEFAULT_TRIP_STOPS: usize = 4;

/// Everything needed to build a plan from chosen places.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub user_id: String,
    pub name: String,
    pub date: Date,
    pub start_time: Time,
    pub origin: GeoLocation,
    /// In the order the user chose them
    pub places: Vec<Place>,
    pub snapshot_radius_km: f64,
    pub snapshot_categories: CategorySelection,
}

/// A built, not necessarily saved, plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDraft {
    pub plan: Plan,
    /// Places were dropped to end the day before the cutoff
    pub truncated: bool,
    /// False when the plan fell back to stops without legs
    pub route_available: bool,
    /// Written to the database by this operation
    #[serde(default)]
    pub saved: bool,
}

impl Planner {
    /// Schedules and routes the requested places.
    ///
    /// Stops are first timed without travel, routed, then re-timed with the
    /// routed leg durations. If travel pushes stops past the day-end cutoff
    /// the surviving stops are routed again so legs always match the final
    /// stops.
    pub async fn build_plan(&self, request: PlanRequest) -> Result<PlanDraft> {
        let (route, truncated, route_available) = self
            .schedule(&request.origin, request.start_time, &request.places)
            .await?;

        let plan = Plan {
            id: None,
            user_id: request.user_id,
            name: request.name.trim().to_string(),
            date: request.date,
            start_time: request.start_time,
            origin_address: request.origin.formatted_address,
            route,
            snapshot_radius_km: request.snapshot_radius_km,
            snapshot_categories: request.snapshot_categories,
        };
        plan.validate()?;

        Ok(PlanDraft {
            plan,
            truncated,
            route_available,
            saved: false,
        })
    }

    /// Rebuilds a plan for new places. Id, name, date, start time, origin
    /// and snapshots are kept; the result is not saved.
    pub async fn rebuild_plan(&self, plan: &Plan, places: Vec<Place>) -> Result<PlanDraft> {
        let origin = self.locate(&plan.origin_address).await?;
        self.rebuild_from(plan, &origin, &places).await
    }

    /// Searches again around a saved plan's origin and rebuilds it with the
    /// chosen places, optionally saving it over the same id.
    ///
    /// The search runs with the plan's snapshot radius and interests, not
    /// the user's current preferences.
    pub async fn regenerate_plan(&self, params: &RegeneratePlan) -> Result<PlanDraft> {
        let plan = self.show_plan(&Id { id: params.id }).await?;
        let results = self
            .search(&SearchPlaces {
                user_id: plan.user_id.clone(),
                location: plan.origin_address.clone(),
                date: plan.date.to_string(),
                radius_km: Some(plan.snapshot_radius_km),
                categories: Some(plan.snapshot_categories.sub_categories()),
            })
            .await?;
        let places = pick_places(
            &results.places,
            &params.picks,
            params.top.unwrap_or(DEFAULT_TRIP_STOPS),
        )?;

        let mut draft = self.rebuild_from(&plan, &results.location, &places).await?;
        if params.save {
            draft.plan = self.save_plan(&draft.plan).await?;
            draft.saved = true;
        }
        Ok(draft)
    }

    async fn rebuild_from(
        &self,
        plan: &Plan,
        origin: &GeoLocation,
        places: &[Place],
    ) -> Result<PlanDraft> {
        let (route, truncated, route_available) =
            self.schedule(origin, plan.start_time, places).await?;

        let regenerated = Plan {
            route,
            ..plan.clone()
        };
        regenerated.validate()?;

        Ok(PlanDraft {
            plan: regenerated,
            truncated,
            route_available,
            saved: false,
        })
    }

    /// Search, pick places, build and optionally save in one call.
    pub async fn plan_trip(&self, params: &BuildTrip) -> Result<PlanDraft> {
        let start_time = parse_time(&params.start_time)?;
        if params.name.trim().is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("Plan name cannot be empty"));
        }

        let results = self.search(&params.search).await?;
        let places = pick_places(
            &results.places,
            &params.picks,
            params.top.unwrap_or(DEFAULT_TRIP_STOPS),
        )?;

        let mut draft = self
            .build_plan(PlanRequest {
                user_id: params.search.user_id.clone(),
                name: params.name.clone(),
                date: parse_date(&params.search.date)?,
                start_time,
                origin: results.location,
                places,
                snapshot_radius_km: results.radius_km,
                snapshot_categories: results.categories,
            })
            .await?;

        if params.save {
            draft.plan = self.save_plan(&draft.plan).await?;
            draft.saved = true;
        }
        Ok(draft)
    }

    async fn schedule(
        &self,
        origin: &GeoLocation,
        start_time: Time,
        places: &[Place],
    ) -> Result<(Route, bool, bool)> {
        if places.is_empty() {
            return Err(PlannerError::invalid_input("places").with_reason("Select at least one place"));
        }

        let itinerary = self.itinerary.build(start_time, places, None);
        self.ensure_schedulable(&itinerary)?;
        let mut truncated = itinerary.truncated;
        let mut stops = itinerary.stops;

        loop {
            let assembly = self
                .assembler
                .assemble(origin.coordinates(), start_time, stops)
                .await?;
            if !assembly.route_available {
                return Ok((assembly.route, truncated, false));
            }

            let mut route = assembly.route;
            let ordered: Vec<Place> = route.stops.iter().map(|s| s.place.clone()).collect();
            let retimed = self
                .itinerary
                .build(start_time, &ordered, Some(&route.leg_durations()));
            self.ensure_schedulable(&retimed)?;

            if !retimed.truncated {
                route.stops = retimed.stops;
                return Ok((route, truncated, true));
            }

            // Travel time pushed the tail past the cutoff; route what is left
            warn!(
                "Dropping {} stops that no longer fit after travel time",
                ordered.len() - retimed.stops.len()
            );
            truncated = true;
            let kept: Vec<Place> = retimed.stops.iter().map(|s| s.place.clone()).collect();
            stops = self.itinerary.build(start_time, &kept, None).stops;
        }
    }

    fn ensure_schedulable(&self, itinerary: &Itinerary) -> Result<()> {
        if itinerary.is_unschedulable() {
            let config = self.itinerary.config();
            return Err(PlannerError::invalid_input("start_time").with_reason(format!(
                "No plan could be built: the first stop does not end before {}",
                config.day_end.strftime("%H:%M")
            )));
        }
        Ok(())
    }
}

/// Chooses places from ranked results: the picks in the given order, or the
/// top `top` when there are no picks.
fn pick_places(ranked: &[RankedPlace], picks: &[String], top: usize) -> Result<Vec<Place>> {
    if picks.is_empty() {
        let places: Vec<Place> = ranked.iter().take(top).map(|r| r.place.clone()).collect();
        info!("Taking the top {} ranked places", places.len());
        return Ok(places);
    }

    let mut places = Vec::with_capacity(picks.len());
    for pick in picks {
        let place = ranked
            .iter()
            .find(|r| &r.place.id == pick)
            .ok_or_else(|| {
                PlannerError::invalid_input("picks")
                    .with_reason(format!("Place '{pick}' is not among the search results"))
            })?;
        if !places.iter().any(|p: &Place| p.id == place.place.id) {
            places.push(place.place.clone());
        }
    }
    Ok(places)
}
