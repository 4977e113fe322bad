//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::datetime::ClockTime;
use crate::{models::Plan, planner::PlanDraft};

/// Result of an update, listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated plan with ID: {}",
            self.resource.id.unwrap_or_default()
        )?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of a delete.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.name,
            self.resource.id.unwrap_or_default()
        )
    }
}

impl fmt::Display for PlanDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.truncated {
            let end = self
                .plan
                .route
                .stops
                .last()
                .map(|stop| ClockTime(&stop.end_time).to_string())
                .unwrap_or_default();
            writeln!(
                f,
                "> Plan exceeds available time: some places were left out, the day ends at {end}."
            )?;
            writeln!(f)?;
        }
        if !self.route_available {
            writeln!(
                f,
                "> Routing was unavailable, stops are listed without walking directions."
            )?;
            writeln!(f)?;
        }
        match self.plan.id {
            Some(id) if self.saved => {
                writeln!(f, "Saved plan with ID: {id}")?;
                writeln!(f)?;
            }
            Some(id) => {
                writeln!(f, "> Rebuilt plan {id} without saving it.")?;
                writeln!(f)?;
            }
            None => {}
        }
        write!(f, "{}", self.plan)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;
    use crate::models::{CategorySelection, Route};

    fn plan(id: Option<u64>) -> Plan {
        Plan {
            id,
            user_id: "ana".to_string(),
            name: "Sunday".to_string(),
            date: date(2026, 5, 4),
            start_time: time(9, 0, 0, 0),
            origin_address: String::new(),
            route: Route::default(),
            snapshot_radius_km: 2.0,
            snapshot_categories: CategorySelection::new(),
        }
    }

    #[test]
    fn test_result_wrappers() {
        let updated = UpdateResult::with_changes(plan(Some(3)), vec!["Renamed to Sunday".to_string()]);
        assert!(updated.to_string().contains("- Renamed to Sunday"));
        assert_eq!(
            DeleteResult::new(plan(Some(3))).to_string(),
            "Deleted plan 'Sunday' (ID: 3)\n"
        );
    }

    #[test]
    fn test_draft_notes() {
        let draft = PlanDraft {
            plan: plan(None),
            truncated: true,
            route_available: false,
            saved: false,
        };
        let output = draft.to_string();
        assert!(output.contains("Plan exceeds available time"));
        assert!(output.contains("Routing was unavailable"));
        assert!(output.contains("# Sunday (unsaved)"));
    }

    #[test]
    fn test_draft_save_state() {
        let rebuilt = PlanDraft {
            plan: plan(Some(4)),
            truncated: false,
            route_available: true,
            saved: false,
        };
        let output = rebuilt.to_string();
        assert!(output.contains("Rebuilt plan 4 without saving it."));
        assert!(!output.contains("Saved plan"));

        let saved = PlanDraft {
            saved: true,
            ..rebuilt
        };
        assert!(saved.to_string().starts_with("Saved plan with ID: 4\n"));
    }
}
