//! Parameter structures for planner operations.
//!
//! These are shared by every interface (CLI, MCP) and carry no framework
//! derives beyond serde. Interfaces wrap them with their own types (clap
//! `Args`, `#[serde(transparent)]` MCP requests) and convert with `From`.
//! JSON schemas are derived only with the `schema` feature.
//!
//! Dates and times are plain strings here (`2026-05-03`, `13:00`) and are
//! parsed by the planner, so every interface reports the same errors.

use jiff::civil::{Date, Time};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_plan and delete_plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: u64,
}

/// Parameters for listing a user's saved plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Owner of the plans
    pub user_id: String,
}

/// Parameters for renaming a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RenamePlan {
    pub id: u64,
    /// New, non-empty plan name
    pub name: String,
}

/// Parameters for reading a user's preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GetPreferences {
    pub user_id: String,
}

/// Parameters for updating a user's preferences. Omitted fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePreferences {
    pub user_id: String,
    /// Search radius in kilometres (0 to 5)
    pub radius_km: Option<f64>,
    /// Selected sub-categories, e.g. `catering.cafe`. An empty list clears
    /// the selection.
    pub categories: Option<Vec<String>>,
}

/// Parameters for a weather advisory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WeatherQuery {
    /// Free-text location
    pub location: String,
    /// Trip date, `YYYY-MM-DD`
    pub date: String,
}

/// Parameters for a place search. Radius and categories override the
/// user's stored preferences for this search only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SearchPlaces {
    pub user_id: String,
    /// Free-text starting location
    pub location: String,
    /// Trip date, `YYYY-MM-DD`
    pub date: String,
    pub radius_km: Option<f64>,
    pub categories: Option<Vec<String>>,
}

/// Parameters for building a trip from a fresh search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BuildTrip {
    #[serde(flatten)]
    pub search: SearchPlaces,
    /// Plan name
    pub name: String,
    /// Start of the day, `HH:MM`
    pub start_time: String,
    /// Place ids to visit, in preference order. Empty takes the top ranked
    /// places.
    #[serde(default)]
    pub picks: Vec<String>,
    /// How many top ranked places to take when no picks are given
    pub top: Option<usize>,
    /// Store the plan after building it
    #[serde(default)]
    pub save: bool,
}

/// Parameters for rebuilding a saved plan around new places.
///
/// Places come from a fresh search around the plan's origin and date with
/// the radius and interests frozen into the plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RegeneratePlan {
    /// The ID of the saved plan
    pub id: u64,
    /// Place ids to visit, in preference order. Empty takes the top ranked
    /// places.
    #[serde(default)]
    pub picks: Vec<String>,
    /// How many top ranked places to take when no picks are given
    pub top: Option<usize>,
    /// Write the rebuilt plan over the saved one
    #[serde(default)]
    pub save: bool,
}

/// Parses a `YYYY-MM-DD` date parameter.
pub fn parse_date(value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        PlannerError::invalid_input("date").with_reason(format!("'{value}' is not a date: {e}"))
    })
}

/// Parses an `HH:MM` (or `HH:MM:SS`) time parameter.
pub fn parse_time(value: &str) -> Result<Time> {
    value.trim().parse::<Time>().map_err(|e| {
        PlannerError::invalid_input("start_time")
            .with_reason(format!("'{value}' is not a time of day: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(parse_date(" 2026-05-03 ").unwrap(), date(2026, 5, 3));
        assert_eq!(parse_time("13:00").unwrap(), time(13, 0, 0, 0));
        assert_eq!(parse_time("09:15:30").unwrap(), time(9, 15, 30, 0));

        let err = parse_date("tomorrow").unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "date"));
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_build_trip_flattens_search() {
        let json = r#"{
            "user_id": "ana", "location": "Ghent", "date": "2026-05-03",
            "name": "Saturday", "start_time": "10:00"
        }"#;
        let params: BuildTrip = serde_json::from_str(json).unwrap();
        assert_eq!(params.search.location, "Ghent");
        assert!(params.picks.is_empty());
        assert!(!params.save);
    }
}
