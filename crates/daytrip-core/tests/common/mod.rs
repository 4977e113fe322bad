#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use daytrip_core::{
    Coordinates, GeoLocation, PlanStop, Planner, PlannerBuilder, WeatherSummary,
    gateway::{
        Catalog, GatewayError, GatewayResult, GeocodingGateway, RouteGateway, RouteSolution,
        WeatherGateway,
    },
};
use jiff::civil::{Date, Time};
use tempfile::TempDir;

/// Central Ghent with five places and two days of weather. 2026-05-03 is
/// rainy, 2026-05-04 is dry.
pub const GHENT_CATALOG: &str = r#"{
    "locations": [
        { "query": "Ghent", "lat": 51.0543, "lon": 3.7174, "formatted_address": "Korenmarkt, 9000 Ghent" }
    ],
    "places": [
        { "id": "castle", "name": "Gravensteen", "address": "Sint-Veerleplein 11",
          "lat": 51.0573, "lon": 3.7207, "categories": ["tourism.sights.castle"] },
        { "id": "stam", "name": "STAM", "address": "Godshuizenlaan 2",
          "lat": 51.0425, "lon": 3.7193, "categories": ["entertainment.museum"] },
        { "id": "park", "name": "Citadelpark", "address": "Citadelpark",
          "lat": 51.0375, "lon": 3.7225, "categories": ["leisure.park"] },
        { "id": "cafe", "name": "Café Labath", "address": "Oude Houtlei 1",
          "lat": 51.0550, "lon": 3.7220, "categories": ["catering.cafe"] },
        { "id": "belfry", "name": "Belfort", "address": "Sint-Baafsplein",
          "lat": 51.0536, "lon": 3.7249, "categories": ["tourism.sights"] }
    ],
    "weather": [
        { "date": "2026-05-03", "temperature_c": 3.0, "uv_index": 7.0,
          "conditions": "showers", "precipitation_likely": true },
        { "date": "2026-05-04", "temperature_c": 21.0, "uv_index": 4.0,
          "conditions": "sunny", "precipitation_likely": false }
    ]
}"#;

pub fn ghent_catalog() -> Catalog {
    serde_json::from_str(GHENT_CATALOG).expect("Failed to parse test catalog")
}

/// Planner backed by the Ghent catalog and the default walking router.
pub async fn create_test_planner() -> (TempDir, Planner) {
    create_planner_with(|builder| builder).await
}

/// Planner with the Ghent catalog plus whatever `configure` adds.
pub async fn create_planner_with<F>(configure: F) -> (TempDir, Planner)
where
    F: FnOnce(PlannerBuilder) -> PlannerBuilder,
{
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let builder = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_catalog(ghent_catalog());
    let planner = configure(builder)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Weather service that is down.
pub struct FailingWeather;

#[async_trait]
impl WeatherGateway for FailingWeather {
    async fn daily_weather(
        &self,
        _location: Coordinates,
        _date: Date,
    ) -> GatewayResult<Option<WeatherSummary>> {
        Err(GatewayError::Request("weather service timed out".to_string()))
    }
}

/// Routing service that is down.
pub struct FailingRouter;

#[async_trait]
impl RouteGateway for FailingRouter {
    async fn compute_route(
        &self,
        _origin: Coordinates,
        _start_time: Time,
        _stops: &[PlanStop],
    ) -> GatewayResult<Option<RouteSolution>> {
        Err(GatewayError::Request("routing service unreachable".to_string()))
    }
}

/// Geocoder that counts calls and always resolves to central Ghent.
#[derive(Default)]
pub struct CountingGeocoder {
    pub calls: AtomicUsize,
}

impl CountingGeocoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingGateway for CountingGeocoder {
    async fn geocode(&self, _query: &str) -> GatewayResult<Option<GeoLocation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(GeoLocation {
            lat: 51.0543,
            lon: 3.7174,
            formatted_address: "Korenmarkt, 9000 Ghent".to_string(),
        }))
    }
}
