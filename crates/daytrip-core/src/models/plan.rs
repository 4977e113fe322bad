//! Plan aggregate.

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use super::{CategorySelection, Route};
use crate::error::{PlannerError, Result};

/// A named, saveable itinerary for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Assigned on first save
    pub id: Option<u64>,

    pub user_id: String,

    pub name: String,

    pub date: Date,

    pub start_time: Time,

    pub origin_address: String,

    pub route: Route,

    /// Radius in effect when the plan was created
    pub snapshot_radius_km: f64,

    /// Interests in effect when the plan was created
    #[serde(default)]
    pub snapshot_categories: CategorySelection,
}

impl Plan {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Checks the aggregate before it is written.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("Plan name cannot be empty"));
        }
        if self.user_id.trim().is_empty() {
            return Err(PlannerError::invalid_input("user_id").with_reason("User ID cannot be empty"));
        }
        self.route.validate()
    }
}
