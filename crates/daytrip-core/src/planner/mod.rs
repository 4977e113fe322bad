//! High-level planner API.
//!
//! [`Planner`] coordinates the pipeline from a free-text location to a saved
//! plan:
//!
//! ```text
//! search:  validate prefs ─▶ geocode ─▶ weather ∥ places ─▶ dedupe ─▶ rank
//! build:   itinerary ─▶ route assembler ─▶ re-time with leg durations
//! save:    validate ─▶ replace-on-save transaction
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`search_ops`]: Place search and weather advisory
//! - [`trip_ops`]: Itinerary building, routing and regeneration
//! - [`plan_ops`]: Saving, loading, listing, renaming and deleting plans
//! - [`preference_ops`]: Reading and updating user preferences
//!
//! Database work runs on the blocking pool with a fresh connection per
//! operation; gateway calls are awaited directly.
//!
//! # Usage
//!
//! ```rust,no_run
//! use daytrip_core::{PlannerBuilder, gateway::Catalog, params::SearchPlaces};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/daytrip.db"))
//!     .with_catalog(Catalog::from_path("catalog.json")?)
//!     .build()
//!     .await?;
//!
//! let results = planner
//!     .search(&SearchPlaces {
//!         user_id: "ana".to_string(),
//!         location: "Ghent".to_string(),
//!         date: "2026-05-03".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{}", results.advice.text);
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::{sync::Mutex, task};

use crate::{
    db::Database,
    error::{PlannerError, Result},
    gateway::{GeocodingGateway, PlacesGateway, WeatherGateway},
    itinerary::ItineraryBuilder,
    routing::RouteAssembler,
    taxonomy::Taxonomy,
};

pub mod builder;
pub mod plan_ops;
pub mod preference_ops;
pub mod search_ops;
pub mod trip_ops;


pub use builder::PlannerBuilder;
pub use search_ops::SearchResults;
pub use trip_ops::{PlanDraft, PlanRequest};

/// Collaborators used for search. Absent when no catalog or service was
/// configured; search operations then fail with a configuration error.
#[derive(Clone)]
pub(crate) struct SearchGateways {
    pub(crate) geocoder: Arc<dyn GeocodingGateway>,
    pub(crate) places: Arc<dyn PlacesGateway>,
    pub(crate) weather: Arc<dyn WeatherGateway>,
}

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) taxonomy: Arc<Taxonomy>,
    pub(crate) gateways: Option<SearchGateways>,
    pub(crate) assembler: RouteAssembler,
    pub(crate) itinerary: ItineraryBuilder,
    /// Serializes replace-on-save writes
    pub(crate) save_lock: Mutex<()>,
}

impl Planner {
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn itinerary_builder(&self) -> &ItineraryBuilder {
        &self.itinerary
    }

    pub(crate) fn gateways(&self) -> Result<&SearchGateways> {
        self.gateways.as_ref().ok_or_else(|| PlannerError::Configuration {
            message: "No place catalog or search service is configured".to_string(),
        })
    }

    /// Runs `op` against a fresh database connection on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database, &Taxonomy) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let taxonomy = Arc::clone(&self.taxonomy);

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db, &taxonomy)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
