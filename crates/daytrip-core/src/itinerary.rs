//! Itinerary builder: turns an ordered place list into timed stops.
//!
//! A running clock starts at the trip's start time. Each place costs the
//! travel time of its incoming leg followed by a fixed visit duration. The
//! first stop whose end would pass the day-end cutoff ends the walk and marks
//! the itinerary as truncated; stops built before it stay valid.

use jiff::{SignedDuration, civil::Time};
use serde::{Deserialize, Serialize};

use crate::models::{Place, PlanStop};

/// Scheduling policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ItineraryConfig {
    /// Time spent at each place
    pub visit_duration: SignedDuration,
    /// No stop may end after this time of day
    pub day_end: Time,
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self {
            visit_duration: SignedDuration::from_mins(60),
            day_end: Time::constant(22, 0, 0, 0),
        }
    }
}

/// Timed stops plus whether trailing places were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    pub stops: Vec<PlanStop>,
    pub truncated: bool,
}

impl Itinerary {
    /// True when places were given but not even the first one fit. Callers
    /// report this as "no plan could be built".
    pub fn is_unschedulable(&self) -> bool {
        self.truncated && self.stops.is_empty()
    }
}

/// Builds itineraries under one [`ItineraryConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ItineraryBuilder {
    config: ItineraryConfig,
}

impl ItineraryBuilder {
    pub fn new(config: ItineraryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ItineraryConfig {
        &self.config
    }

    /// Schedules `places` in the given order starting at `start`.
    ///
    /// `leg_durations[i]` is the travel time into the i-th place; missing
    /// entries (and the whole slice when `None`) count as zero.
    pub fn build(
        &self,
        start: Time,
        places: &[Place],
        leg_durations: Option<&[SignedDuration]>,
    ) -> Itinerary {
        let mut itinerary = Itinerary::default();
        let mut clock = start;

        for (index, place) in places.iter().enumerate() {
            let travel = leg_durations
                .and_then(|durations| durations.get(index))
                .copied()
                .filter(|d| !d.is_negative())
                .unwrap_or(SignedDuration::ZERO);

            // checked_add fails past midnight, which is past any cutoff too
            let window = clock
                .checked_add(travel)
                .and_then(|arrive| Ok((arrive, arrive.checked_add(self.config.visit_duration)?)));
            let (arrive, depart) = match window {
                Ok((arrive, depart)) if depart <= self.config.day_end => (arrive, depart),
                _ => {
                    itinerary.truncated = true;
                    break;
                }
            };

            itinerary.stops.push(PlanStop {
                sequence: index as u32,
                place: place.clone(),
                start_time: arrive,
                end_time: depart,
            });
            clock = depart;
        }

        itinerary
    }
}
