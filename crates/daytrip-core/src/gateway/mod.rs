//! Ports for the external collaborators: geocoding, weather, places and
//! routing.
//!
//! Every call distinguishes "nothing found" (`Ok(None)` or an empty list)
//! from a transient failure (`Err`). The planner converts both into the
//! error taxonomy at the boundary of the operation that made the call.
//!
//! Two implementations ship with the crate:
//!
//! - [`CatalogGateway`]: geocoding, places and weather served from a JSON
//!   catalog file, for offline use and tests.
//! - [`StraightLineRouter`]: a routing gateway that orders stops with a
//!   nearest-neighbour tour improved by 2-opt and walks straight lines.

use async_trait::async_trait;
use jiff::civil::{Date, Time};
use thiserror::Error;

use crate::models::{Coordinates, GeoLocation, Place, PlanStop, Step, WeatherSummary};

pub mod catalog;
pub mod local_route;

pub use catalog::{Catalog, CatalogGateway};
pub use local_route::StraightLineRouter;

/// Transient collaborator failure.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request could not be completed
    #[error("request failed: {0}")]
    Request(String),

    /// The collaborator answered with something unusable
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[async_trait]
pub trait GeocodingGateway: Send + Sync {
    /// Resolves a free-text location.
    async fn geocode(&self, query: &str) -> GatewayResult<Option<GeoLocation>>;
}

#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Daily summary for a location and date.
    async fn daily_weather(
        &self,
        location: Coordinates,
        date: Date,
    ) -> GatewayResult<Option<WeatherSummary>>;
}

#[async_trait]
pub trait PlacesGateway: Send + Sync {
    /// Places within `radius_km`. `None` categories means the provider's
    /// default selection.
    async fn search_places(
        &self,
        location: Coordinates,
        radius_km: f64,
        categories: Option<&[String]>,
    ) -> GatewayResult<Vec<Place>>;
}

/// A leg as produced by a routing collaborator, before it is attached to
/// stops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegDraft {
    pub distance_m: u32,
    pub duration_s: u32,
    pub polyline: String,
    pub steps: Vec<Step>,
}

/// Optimised route for a set of stops.
///
/// A route anchored at the origin carries `outbound`, giving one leg per
/// stop; otherwise only the legs between stops are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSolution {
    /// Visiting order as indices into the submitted stops
    pub waypoint_order: Vec<usize>,
    /// Origin to the first visited stop
    pub outbound: Option<LegDraft>,
    /// Between consecutive stops in visiting order
    pub legs: Vec<LegDraft>,
    pub total_distance_m: u32,
    pub total_duration_s: u32,
    pub polyline: String,
}

#[async_trait]
pub trait RouteGateway: Send + Sync {
    /// Computes an optimised walking route from `origin` through `stops`.
    async fn compute_route(
        &self,
        origin: Coordinates,
        start_time: Time,
        stops: &[PlanStop],
    ) -> GatewayResult<Option<RouteSolution>>;
}
