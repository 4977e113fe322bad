//! Weather advisory: clothing and sun advice plus the indoor/outdoor signal.

use crate::models::{WeatherAdvice, WeatherSummary};

/// Advice text used when no weather data could be obtained.
pub const WEATHER_UNAVAILABLE_TEXT: &str =
    "Weather data unavailable, results are not weather-optimized.";

fn temperature_advice(celsius: f64) -> &'static str {
    if celsius <= 5.0 {
        "It will be cold, wear a warm jacket."
    } else if celsius <= 15.0 {
        "It will be cool, bring a light jacket or sweater."
    } else if celsius <= 25.0 {
        "Temperatures are comfortable, light layers will do."
    } else {
        "It will be warm, wear light clothing and stay hydrated."
    }
}

fn uv_advice(uv_index: f64) -> &'static str {
    if uv_index >= 6.0 {
        "UV is high, use sunscreen, sunglasses and a hat."
    } else if uv_index >= 3.0 {
        "UV is moderate, sunscreen is advisable."
    } else {
        "UV is low, little sun risk."
    }
}

/// Turns a daily summary into advice. `None` produces the degraded
/// advisory with no ranking signal.
pub fn advise(summary: Option<&WeatherSummary>) -> WeatherAdvice {
    let Some(summary) = summary else {
        return WeatherAdvice {
            text: WEATHER_UNAVAILABLE_TEXT.to_string(),
            favor_indoor: None,
        };
    };

    let mut parts: Vec<&str> = Vec::with_capacity(4);
    parts.push(temperature_advice(summary.temperature_c));
    parts.push(uv_advice(summary.uv_index));

    let favor_indoor = summary.precipitation_likely;
    if favor_indoor {
        parts.push("Rain is likely, bring an umbrella or a waterproof layer.");
        parts.push("Favouring indoor places.");
    } else {
        parts.push("Good conditions for being outside.");
        parts.push("Favouring outdoor places.");
    }

    let mut text = String::new();
    if !summary.conditions.trim().is_empty() {
        text.push_str(&format!("Forecast: {}. ", summary.conditions.trim()));
    }
    text.push_str(&parts.join(" "));

    WeatherAdvice {
        text,
        favor_indoor: Some(favor_indoor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(temperature_c: f64, uv_index: f64, rain: bool) -> WeatherSummary {
        WeatherSummary {
            temperature_c,
            uv_index,
            conditions: String::new(),
            precipitation_likely: rain,
        }
    }

    #[test]
    fn test_cold_sunny_rainy_day() {
        let advice = advise(Some(&summary(3.0, 7.0, true)));
        let text = advice.text.to_lowercase();
        assert!(text.contains("cold"));
        assert!(text.contains("sunscreen"));
        assert!(text.contains("favouring indoor"));
        assert_eq!(advice.favor_indoor, Some(true));
    }

    #[test]
    fn test_temperature_bucket_edges() {
        assert!(advise(Some(&summary(5.0, 0.0, false))).text.contains("cold"));
        assert!(advise(Some(&summary(5.1, 0.0, false))).text.contains("light jacket"));
        assert!(advise(Some(&summary(15.0, 0.0, false))).text.contains("light jacket"));
        assert!(advise(Some(&summary(15.5, 0.0, false))).text.contains("light layers"));
        assert!(advise(Some(&summary(25.0, 0.0, false))).text.contains("light layers"));
        assert!(advise(Some(&summary(25.1, 0.0, false))).text.contains("hydrated"));
    }

    #[test]
    fn test_uv_bucket_edges() {
        assert!(advise(Some(&summary(20.0, 6.0, false))).text.contains("hat"));
        assert!(advise(Some(&summary(20.0, 5.9, false))).text.contains("sunscreen is advisable"));
        assert!(advise(Some(&summary(20.0, 3.0, false))).text.contains("sunscreen is advisable"));
        assert!(advise(Some(&summary(20.0, 2.9, false))).text.contains("little sun risk"));
    }

    #[test]
    fn test_dry_day_favours_outdoor() {
        let advice = advise(Some(&summary(18.0, 2.0, false)));
        assert_eq!(advice.favor_indoor, Some(false));
        assert!(advice.text.contains("Favouring outdoor"));
        assert!(!advice.text.contains("umbrella"));
    }

    #[test]
    fn test_conditions_are_quoted() {
        let mut s = summary(12.0, 1.0, true);
        s.conditions = "light rain".to_string();
        assert!(advise(Some(&s)).text.starts_with("Forecast: light rain."));
    }

    #[test]
    fn test_unavailable_weather_degrades() {
        let advice = advise(None);
        assert_eq!(advice.text, WEATHER_UNAVAILABLE_TEXT);
        assert_eq!(advice.favor_indoor, None);
        assert!(!advice.is_weather_optimized());
    }
}
