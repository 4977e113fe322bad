//! Place search and weather advisory for the Planner.

use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{Planner, SearchGateways};
use crate::{
    advisory::advise,
    error::{PlannerError, Result},
    models::{
        CategorySelection, GeoLocation, Place, PreferenceProfile, WeatherAdvice,
    },
    params::{GetPreferences, SearchPlaces, WeatherQuery, parse_date},
    ranking::{RankedPlace, rank},
};

/// Outcome of a place search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    /// Resolved starting location
    pub location: GeoLocation,
    pub advice: WeatherAdvice,
    /// Preferences the search ran with
    pub radius_km: f64,
    pub categories: CategorySelection,
    /// Best first
    pub places: Vec<RankedPlace>,
}

impl Planner {
    /// Searches and ranks places around a location.
    ///
    /// Preferences are validated before any gateway is called. Weather and
    /// places are requested concurrently once the location is known; a
    /// missing or failed forecast only removes the weather bonus.
    ///
    /// # Errors
    ///
    /// - `PreferenceValidation` for an out-of-range radius or too few interests
    /// - `LocationNotFound` when geocoding has no match
    /// - `NoPlacesFound` when the search comes back empty
    /// - `Gateway` when geocoding or the places search fails
    pub async fn search(&self, params: &SearchPlaces) -> Result<SearchResults> {
        let date = parse_date(&params.date)?;
        let profile = self.effective_profile(params).await?;
        let gateways = self.gateways()?;

        let location = Self::geocode(gateways, &params.location).await?;
        let coordinates = location.coordinates();

        let selected = profile.categories.sub_categories();
        let selected_filter = (!selected.is_empty()).then_some(selected.as_slice());

        let (weather, places) = tokio::join!(
            gateways.weather.daily_weather(coordinates, date),
            gateways
                .places
                .search_places(coordinates, profile.radius_km, selected_filter),
        );

        let weather = match weather {
            Ok(Some(summary)) => Some(summary),
            Ok(None) => {
                warn!("No forecast for {} on {date}", location.formatted_address);
                None
            }
            Err(e) => {
                warn!("{}", PlannerError::WeatherUnavailable { reason: e.to_string() });
                None
            }
        };
        let advice = advise(weather.as_ref());

        let places = places.map_err(|e| PlannerError::Gateway {
            gateway: "places",
            message: e.to_string(),
        })?;
        let places = dedupe(places);
        if places.is_empty() {
            return Err(PlannerError::NoPlacesFound {
                location: location.formatted_address,
            });
        }
        debug!("Ranking {} places", places.len());

        Ok(SearchResults {
            places: rank(places, &selected, advice.favor_indoor),
            location,
            advice,
            radius_km: profile.radius_km,
            categories: profile.categories,
        })
    }

    /// Weather advisory for a location and date. A missing forecast yields
    /// the degraded advisory rather than an error.
    pub async fn weather_advice(&self, params: &WeatherQuery) -> Result<WeatherAdvice> {
        let date = parse_date(&params.date)?;
        let gateways = self.gateways()?;
        let location = Self::geocode(gateways, &params.location).await?;

        let summary = gateways
            .weather
            .daily_weather(location.coordinates(), date)
            .await
            .unwrap_or_else(|e| {
                warn!("{}", PlannerError::WeatherUnavailable { reason: e.to_string() });
                None
            });
        Ok(advise(summary.as_ref()))
    }

    /// Resolves a free-text location.
    pub async fn locate(&self, query: &str) -> Result<GeoLocation> {
        Self::geocode(self.gateways()?, query).await
    }

    async fn geocode(gateways: &SearchGateways, query: &str) -> Result<GeoLocation> {
        if query.trim().is_empty() {
            return Err(PlannerError::invalid_input("location").with_reason("Location cannot be empty"));
        }
        gateways
            .geocoder
            .geocode(query)
            .await
            .map_err(|e| PlannerError::Gateway {
                gateway: "geocoding",
                message: e.to_string(),
            })?
            .ok_or_else(|| PlannerError::LocationNotFound {
                query: query.trim().to_string(),
            })
    }

    /// Stored preferences with this search's overrides applied, validated.
    async fn effective_profile(&self, params: &SearchPlaces) -> Result<PreferenceProfile> {
        let mut profile = if params.user_id.trim().is_empty() {
            PreferenceProfile::defaults_for("")
        } else {
            self.get_preferences(&GetPreferences {
                user_id: params.user_id.clone(),
            })
            .await?
        };
        if let Some(radius_km) = params.radius_km {
            profile.radius_km = radius_km;
        }
        if let Some(categories) = &params.categories {
            profile.categories = CategorySelection::from_sub_categories(&self.taxonomy, categories);
        }
        profile.validate(&self.taxonomy)?;
        Ok(profile)
    }
}

/// Drops repeated place ids, keeping the first occurrence.
fn dedupe(places: Vec<Place>) -> Vec<Place> {
    let mut seen = HashSet::new();
    places
        .into_iter()
        .filter(|place| seen.insert(place.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndoorOutdoor;

    #[test]
    fn test_dedupe_keeps_first() {
        let place = |id: &str, name: &str| Place {
            id: id.to_string(),
            name: name.to_string(),
            address: String::new(),
            lat: 0.0,
            lon: 0.0,
            distance_km: 0.0,
            indoor_outdoor: IndoorOutdoor::Mixed,
            categories: Vec::new(),
        };
        let out = dedupe(vec![place("a", "first"), place("b", "b"), place("a", "second")]);
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["first", "b"]);
    }
}
