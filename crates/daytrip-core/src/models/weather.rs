//! Weather summary and advisory models.

use serde::{Deserialize, Serialize};

/// Daily weather as reported by the weather collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    pub temperature_c: f64,
    pub uv_index: f64,
    /// Free-form description such as "light rain"
    #[serde(default)]
    pub conditions: String,
    pub precipitation_likely: bool,
}

/// Human-readable advice plus the indoor/outdoor ranking signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherAdvice {
    pub text: String,
    /// `None` when weather was unavailable; ranking then applies no bonus
    pub favor_indoor: Option<bool>,
}

impl WeatherAdvice {
    pub fn is_weather_optimized(&self) -> bool {
        self.favor_indoor.is_some()
    }
}
