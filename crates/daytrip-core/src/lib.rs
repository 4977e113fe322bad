//! Core library for the day-trip planner.
//!
//! The pipeline turns a location, a date and a user's interests into a timed,
//! walkable itinerary and stores it:
//!
//! - [`ranking`] scores places by interest match, weather fit and distance
//! - [`advisory`] turns a forecast into advice and an indoor/outdoor signal
//! - [`itinerary`] assigns time windows under a day-end cutoff
//! - [`routing`] folds a routing collaborator's answer onto the stops
//! - [`db`] persists plans with replace-on-save semantics
//!
//! External services sit behind the async ports in [`gateway`]; the crate
//! ships a JSON catalog gateway and a straight-line walking router.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use daytrip_core::{
//!     PlannerBuilder,
//!     gateway::Catalog,
//!     params::{BuildTrip, SearchPlaces},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("daytrip.db"))
//!     .with_catalog(Catalog::from_path("catalog.json")?)
//!     .build()
//!     .await?;
//!
//! let draft = planner
//!     .plan_trip(&BuildTrip {
//!         search: SearchPlaces {
//!             user_id: "ana".to_string(),
//!             location: "Ghent".to_string(),
//!             date: "2026-05-03".to_string(),
//!             ..Default::default()
//!         },
//!         name: "Saturday in Ghent".to_string(),
//!         start_time: "10:00".to_string(),
//!         save: true,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{draft}");
//! # Ok(())
//! # }
//! ```

pub mod advisory;
pub mod db;
pub mod display;
pub mod error;
pub mod gateway;
pub mod geo;
pub mod itinerary;
pub mod models;
pub mod params;
pub mod planner;
pub mod ranking;
pub mod routing;
pub mod taxonomy;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    Categories, DeleteResult, OperationStatus, PlanSummaries, UpdateResult,
};
pub use error::{PlannerError, Result};
pub use itinerary::{Itinerary, ItineraryBuilder, ItineraryConfig};
pub use models::{
    CategorySelection, Coordinates, GeoLocation, IndoorOutdoor, Leg, LegEndpoint, Place, Plan,
    PlanStop, PlanSummary, PreferenceProfile, Route, Step, WeatherAdvice, WeatherSummary,
};
pub use params::{
    BuildTrip, GetPreferences, Id, ListPlans, RegeneratePlan, RenamePlan, SearchPlaces,
    UpdatePreferences, WeatherQuery,
};
pub use planner::{PlanDraft, PlanRequest, Planner, PlannerBuilder, SearchResults};
pub use ranking::RankedPlace;
pub use routing::RouteAssembler;
pub use taxonomy::Taxonomy;
