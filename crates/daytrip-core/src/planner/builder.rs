//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::{sync::Mutex, task};

use super::{Planner, SearchGateways};
use crate::{
    db::Database,
    error::{PlannerError, Result},
    gateway::{
        Catalog, CatalogGateway, GeocodingGateway, PlacesGateway, RouteGateway,
        StraightLineRouter, WeatherGateway,
    },
    itinerary::{ItineraryBuilder, ItineraryConfig},
    routing::RouteAssembler,
    taxonomy::Taxonomy,
};

/// Builder for creating and configuring Planner instances.
#[derive(Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    taxonomy: Option<Taxonomy>,
    catalog: Option<Catalog>,
    geocoder: Option<Arc<dyn GeocodingGateway>>,
    places: Option<Arc<dyn PlacesGateway>>,
    weather: Option<Arc<dyn WeatherGateway>>,
    router: Option<Arc<dyn RouteGateway>>,
    itinerary: ItineraryConfig,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/daytrip/daytrip.db` or `~/.local/share/daytrip/daytrip.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the standard category taxonomy.
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Serves geocoding, places and weather from a catalog. Gateways set
    /// individually take precedence.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_geocoder(mut self, gateway: Arc<dyn GeocodingGateway>) -> Self {
        self.geocoder = Some(gateway);
        self
    }

    pub fn with_places(mut self, gateway: Arc<dyn PlacesGateway>) -> Self {
        self.places = Some(gateway);
        self
    }

    pub fn with_weather(mut self, gateway: Arc<dyn WeatherGateway>) -> Self {
        self.weather = Some(gateway);
        self
    }

    /// Sets the routing gateway. Defaults to [`StraightLineRouter`].
    pub fn with_router(mut self, gateway: Arc<dyn RouteGateway>) -> Self {
        self.router = Some(gateway);
        self
    }

    /// Sets the visit duration and day-end cutoff.
    pub fn with_itinerary_config(mut self, config: ItineraryConfig) -> Self {
        self.itinerary = config;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the database directory cannot be
    /// created, `PlannerError::Persistence` if database initialization fails
    /// and `PlannerError::Configuration` if only some search gateways are set
    /// without a catalog to fill the rest.
    pub async fn build(self) -> Result<Planner> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PlannerError>(())
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let taxonomy = self.taxonomy.unwrap_or_default();
        let catalog = self
            .catalog
            .map(|catalog| Arc::new(CatalogGateway::new(catalog, taxonomy.clone())));

        let gateways = match (self.geocoder, self.places, self.weather, catalog) {
            (None, None, None, None) => None,
            (geocoder, places, weather, catalog) => {
                let missing = |name: &str| PlannerError::Configuration {
                    message: format!("No {name} gateway configured"),
                };
                Some(SearchGateways {
                    geocoder: geocoder
                        .or_else(|| catalog.clone().map(|c| c as Arc<dyn GeocodingGateway>))
                        .ok_or_else(|| missing("geocoding"))?,
                    places: places
                        .or_else(|| catalog.clone().map(|c| c as Arc<dyn PlacesGateway>))
                        .ok_or_else(|| missing("places"))?,
                    weather: weather
                        .or_else(|| catalog.map(|c| c as Arc<dyn WeatherGateway>))
                        .ok_or_else(|| missing("weather"))?,
                })
            }
        };

        let router = self
            .router
            .unwrap_or_else(|| Arc::new(StraightLineRouter::default()));

        Ok(Planner {
            db_path,
            taxonomy: Arc::new(taxonomy),
            gateways,
            assembler: RouteAssembler::new(router),
            itinerary: ItineraryBuilder::new(self.itinerary),
            save_lock: Mutex::new(()),
        })
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("daytrip")
            .place_data_file("daytrip.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}
