//! Route graph: stops, legs and turn-by-turn steps.

use jiff::{SignedDuration, civil::Time};
use serde::{Deserialize, Serialize};

use super::Place;
use crate::error::{PlannerError, Result};

/// One visited place with its assigned time window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanStop {
    /// Position in visiting order (0-indexed, unique within a plan)
    pub sequence: u32,

    pub place: Place,

    pub start_time: Time,

    pub end_time: Time,
}

/// One walking instruction within a leg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    pub distance_m: u32,
    pub duration_s: u32,
    pub instruction: String,
}

/// Either end of a leg.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LegEndpoint {
    /// The trip's starting address
    Origin,
    /// A stop, identified by its sequence number
    Stop(u32),
}

impl LegEndpoint {
    /// Sequence number for persistence; `None` stands for the origin.
    pub fn sequence(&self) -> Option<u32> {
        match self {
            LegEndpoint::Origin => None,
            LegEndpoint::Stop(seq) => Some(*seq),
        }
    }

    pub fn from_sequence(sequence: Option<u32>) -> Self {
        sequence.map_or(LegEndpoint::Origin, LegEndpoint::Stop)
    }
}

/// Travel segment between two consecutive stops, or from the origin to the
/// first stop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Leg {
    pub distance_m: u32,
    pub duration_s: u32,
    /// Google encoded polyline (precision 5)
    #[serde(default)]
    pub polyline: String,
    pub start: LegEndpoint,
    pub end: LegEndpoint,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Leg {
    pub fn duration(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.duration_s))
    }
}

/// Ordered stops plus the legs that connect them.
///
/// A route without legs is a stops-only plan: either routing was
/// unavailable or the plan predates route storage. A routed plan that leaves
/// from the origin has one leg per stop, the first starting at the origin;
/// otherwise it has one leg fewer than it has stops.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub stops: Vec<PlanStop>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub total_distance_m: u32,
    #[serde(default)]
    pub total_duration_s: u32,
    #[serde(default)]
    pub polyline: String,
}

impl Route {
    /// A route with stops only, no legs.
    pub fn stops_only(stops: Vec<PlanStop>) -> Self {
        Self {
            stops,
            ..Default::default()
        }
    }

    pub fn has_legs(&self) -> bool {
        !self.legs.is_empty()
    }

    /// Travel time into each stop, in stop order. Stops without an incoming
    /// leg get zero.
    pub fn leg_durations(&self) -> Vec<SignedDuration> {
        self.stops
            .iter()
            .map(|stop| {
                self.legs
                    .iter()
                    .find(|leg| leg.end == LegEndpoint::Stop(stop.sequence))
                    .map_or(SignedDuration::ZERO, Leg::duration)
            })
            .collect()
    }

    /// Checks the stop ordering and time-window invariants, that every leg
    /// attaches to known stops in a continuous chain, and the leg count.
    pub fn validate(&self) -> Result<()> {
        for stop in &self.stops {
            if stop.end_time < stop.start_time {
                return Err(PlannerError::invalid_input("stops").with_reason(format!(
                    "Stop {} ends before it starts",
                    stop.sequence
                )));
            }
        }

        for pair in self.stops.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            if later.sequence <= earlier.sequence {
                return Err(PlannerError::invalid_input("stops").with_reason(format!(
                    "Stop sequence must increase, found {} after {}",
                    later.sequence, earlier.sequence
                )));
            }
            if later.start_time < earlier.end_time {
                return Err(PlannerError::invalid_input("stops").with_reason(format!(
                    "Stop {} starts before stop {} ends",
                    later.sequence, earlier.sequence
                )));
            }
        }

        let known = |endpoint: LegEndpoint| match endpoint {
            LegEndpoint::Origin => true,
            LegEndpoint::Stop(seq) => self.stops.iter().any(|s| s.sequence == seq),
        };
        for (index, leg) in self.legs.iter().enumerate() {
            if !known(leg.start) || !known(leg.end) {
                return Err(PlannerError::invalid_input("legs").with_reason(format!(
                    "Leg {index} references a stop that is not part of the plan"
                )));
            }
        }
        for (index, pair) in self.legs.windows(2).enumerate() {
            if pair[0].end != pair[1].start {
                return Err(PlannerError::invalid_input("legs").with_reason(format!(
                    "Leg {} does not start where leg {index} ends",
                    index + 1
                )));
            }
        }

        let Some(first) = self.legs.first() else {
            return Ok(());
        };
        for (index, leg) in self.legs.iter().enumerate() {
            if leg.end == LegEndpoint::Origin || (index > 0 && leg.start == LegEndpoint::Origin) {
                return Err(PlannerError::invalid_input("legs").with_reason(format!(
                    "Leg {index} may not return to the origin"
                )));
            }
        }
        let expected = if first.start == LegEndpoint::Origin {
            self.stops.len()
        } else {
            self.stops.len().saturating_sub(1)
        };
        if self.legs.len() != expected {
            return Err(PlannerError::invalid_input("legs").with_reason(format!(
                "Expected {expected} legs for {} stops, found {}",
                self.stops.len(),
                self.legs.len()
            )));
        }

        Ok(())
    }
}
