//! JSON catalog serving geocoding, places and weather lookups.
//!
//! ```json
//! {
//!   "locations": [
//!     { "query": "ghent", "lat": 51.0543, "lon": 3.7174,
//!       "formatted_address": "Korenmarkt, 9000 Ghent" }
//!   ],
//!   "places": [
//!     { "id": "gravensteen", "name": "Gravensteen", "address": "Sint-Veerleplein 11",
//!       "lat": 51.0573, "lon": 3.7207,
//!       "categories": ["tourism.sights.castle"] }
//!   ],
//!   "weather": [
//!     { "date": "2026-05-03", "temperature_c": 14.0, "uv_index": 4.0,
//!       "conditions": "showers", "precipitation_likely": true }
//!   ]
//! }
//! ```
//!
//! Places without an `indoor_outdoor` field are classified from their
//! categories through the taxonomy.

use std::path::Path;

use async_trait::async_trait;
use jiff::civil::Date;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{GatewayResult, GeocodingGateway, PlacesGateway, WeatherGateway};
use crate::{
    error::{PlannerError, Result},
    geo::haversine_km,
    models::{Coordinates, GeoLocation, IndoorOutdoor, Place, WeatherSummary},
    taxonomy::{Taxonomy, is_dotted_prefix},
};

/// A named location the catalog can geocode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogLocation {
    pub query: String,
    pub lat: f64,
    pub lon: f64,
    pub formatted_address: String,
}

/// A place entry; distance is computed per search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPlace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub indoor_outdoor: Option<IndoorOutdoor>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Weather for one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogWeather {
    pub date: Date,
    #[serde(flatten)]
    pub summary: WeatherSummary,
}

/// Catalog file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub locations: Vec<CatalogLocation>,
    #[serde(default)]
    pub places: Vec<CatalogPlace>,
    #[serde(default)]
    pub weather: Vec<CatalogWeather>,
}

impl Catalog {
    /// Reads a catalog from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PlannerError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Offline gateway backed by a [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogGateway {
    catalog: Catalog,
    taxonomy: Taxonomy,
}

impl CatalogGateway {
    pub fn new(catalog: Catalog, taxonomy: Taxonomy) -> Self {
        Self { catalog, taxonomy }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, taxonomy: Taxonomy) -> Result<Self> {
        Ok(Self::new(Catalog::from_path(path)?, taxonomy))
    }

    /// Accepts `"lat,lon"` as a literal coordinate pair.
    fn parse_coordinates(query: &str) -> Option<GeoLocation> {
        let (lat, lon) = query.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)).then(|| GeoLocation {
            lat,
            lon,
            formatted_address: format!("{lat:.5}, {lon:.5}"),
        })
    }

    fn to_place(&self, entry: &CatalogPlace, distance_km: f64) -> Place {
        Place {
            id: entry.id.clone(),
            name: entry.name.clone(),
            address: entry.address.clone(),
            lat: entry.lat,
            lon: entry.lon,
            distance_km,
            indoor_outdoor: entry
                .indoor_outdoor
                .unwrap_or_else(|| self.taxonomy.environment_of(&entry.categories)),
            categories: entry.categories.clone(),
        }
    }
}

#[async_trait]
impl GeocodingGateway for CatalogGateway {
    async fn geocode(&self, query: &str) -> GatewayResult<Option<GeoLocation>> {
        let needle = query.trim();
        let found = self
            .catalog
            .locations
            .iter()
            .find(|loc| {
                loc.query.eq_ignore_ascii_case(needle)
                    || loc.formatted_address.eq_ignore_ascii_case(needle)
            })
            .map(|loc| GeoLocation {
                lat: loc.lat,
                lon: loc.lon,
                formatted_address: loc.formatted_address.clone(),
            })
            .or_else(|| Self::parse_coordinates(needle));
        debug!("catalog geocode '{needle}': {}", found.is_some());
        Ok(found)
    }
}

#[async_trait]
impl PlacesGateway for CatalogGateway {
    async fn search_places(
        &self,
        location: Coordinates,
        radius_km: f64,
        categories: Option<&[String]>,
    ) -> GatewayResult<Vec<Place>> {
        let wanted = categories.filter(|c| !c.is_empty());
        let places: Vec<Place> = self
            .catalog
            .places
            .iter()
            .filter(|entry| {
                wanted.is_none_or(|wanted| {
                    wanted.iter().any(|sel| {
                        entry
                            .categories
                            .iter()
                            .any(|category| is_dotted_prefix(sel, category))
                    })
                })
            })
            .filter_map(|entry| {
                let distance = haversine_km(location, Coordinates::new(entry.lat, entry.lon));
                (distance <= radius_km).then(|| self.to_place(entry, distance))
            })
            .collect();
        debug!(
            "catalog search within {radius_km} km returned {} places",
            places.len()
        );
        Ok(places)
    }
}

#[async_trait]
impl WeatherGateway for CatalogGateway {
    async fn daily_weather(
        &self,
        _location: Coordinates,
        date: Date,
    ) -> GatewayResult<Option<WeatherSummary>> {
        Ok(self
            .catalog
            .weather
            .iter()
            .find(|w| w.date == date)
            .map(|w| w.summary.clone()))
    }
}
