//! Place and location models.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Indoor/outdoor classification used for weather-adaptive ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndoorOutdoor {
    Indoor,
    Outdoor,
    /// Neither clearly indoor nor outdoor; never gets a weather bonus
    #[default]
    Mixed,
}

impl FromStr for IndoorOutdoor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indoor" => Ok(IndoorOutdoor::Indoor),
            "outdoor" => Ok(IndoorOutdoor::Outdoor),
            "mixed" => Ok(IndoorOutdoor::Mixed),
            _ => Err(format!("Invalid indoor/outdoor type: {s}")),
        }
    }
}

impl IndoorOutdoor {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndoorOutdoor::Indoor => "indoor",
            IndoorOutdoor::Outdoor => "outdoor",
            IndoorOutdoor::Mixed => "mixed",
        }
    }
}

/// WGS84 coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Result of a successful geocoding lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
    pub formatted_address: String,
}

impl GeoLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// A point of interest returned by the places collaborator.
///
/// Places are treated as immutable for the duration of one search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    /// Provider identifier
    pub id: String,

    pub name: String,

    pub address: String,

    pub lat: f64,

    pub lon: f64,

    /// Distance from the searched location in kilometres
    #[serde(default)]
    pub distance_km: f64,

    #[serde(default)]
    pub indoor_outdoor: IndoorOutdoor,

    /// Dotted category paths in provider order
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}
