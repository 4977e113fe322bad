//! Data models for places, preferences, weather and plans.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so presentation stays separate from the data.
//!
//! The plan aggregate is a tree:
//!
//! ```text
//! Plan ─┬─ snapshot (radius, categories)
//!       └─ Route ─┬─ PlanStop* (sequence order)
//!                 └─ Leg* ── Step* (leg / step index order)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use daytrip_core::models::{CategorySelection, Plan, Route};
//! use jiff::civil::{date, time};
//!
//! let plan = Plan {
//!     id: None,
//!     user_id: "alice".to_string(),
//!     name: "Sunday in Ghent".to_string(),
//!     date: date(2026, 5, 3),
//!     start_time: time(10, 0, 0, 0),
//!     origin_address: "Korenmarkt, Ghent".to_string(),
//!     route: Route::default(),
//!     snapshot_radius_km: 2.0,
//!     snapshot_categories: CategorySelection::new(),
//! };
//! assert!(!plan.is_persisted());
//! assert!(plan.validate().is_ok());
//! ```

pub mod place;
pub mod plan;
pub mod preferences;
pub mod route;
pub mod summary;
pub mod weather;


pub use place::{Coordinates, GeoLocation, IndoorOutdoor, Place};
pub use plan::Plan;
pub use preferences::{
    CategorySelection, DEFAULT_RADIUS_KM, MAX_RADIUS_KM, MIN_SELECTED_CATEGORIES,
    PreferenceProfile,
};
pub use route::{Leg, LegEndpoint, PlanStop, Route, Step};
pub use summary::PlanSummary;
pub use weather::{WeatherAdvice, WeatherSummary};
