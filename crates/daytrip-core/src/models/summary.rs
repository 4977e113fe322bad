//! Plan summary types for list views.

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use super::Plan;

/// Summary information about a saved plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub id: u64,
    pub name: String,
    pub date: Date,
    pub start_time: Time,
    pub origin_address: String,
    pub total_stops: u32,
    pub total_distance_m: u32,
    pub total_duration_s: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id.unwrap_or_default(),
            name: plan.name.clone(),
            date: plan.date,
            start_time: plan.start_time,
            origin_address: plan.origin_address.clone(),
            total_stops: plan.route.stops.len() as u32,
            total_distance_m: plan.route.total_distance_m,
            total_duration_s: plan.route.total_duration_s,
        }
    }
}
