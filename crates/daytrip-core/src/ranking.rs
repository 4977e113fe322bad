//! Place ranking engine.
//!
//! Each place scores [`CATEGORY_POINTS`] for every selected sub-category it
//! matches, [`WEATHER_POINTS`] when its setting suits the weather signal, and
//! loses its distance in kilometres. Places are ordered by descending score
//! with a stable sort, so ties keep the order of the upstream query.

use serde::{Deserialize, Serialize};

use crate::{
    models::{IndoorOutdoor, Place},
    taxonomy::is_dotted_prefix,
};

/// Points per matching selected sub-category.
pub const CATEGORY_POINTS: f64 = 10.0;

/// Bonus for indoor places in rain or outdoor places in dry weather.
pub const WEATHER_POINTS: f64 = 5.0;

/// A place together with the score that ordered it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedPlace {
    pub place: Place,
    pub score: f64,
}

/// Points for the selected sub-categories matched by this place, each
/// selected category counted at most once.
pub fn category_points<S: AsRef<str>>(place: &Place, selected: &[S]) -> f64 {
    let matched = selected
        .iter()
        .filter(|sel| {
            place
                .categories
                .iter()
                .any(|category| is_dotted_prefix(sel.as_ref(), category))
        })
        .count();
    matched as f64 * CATEGORY_POINTS
}

/// Weather bonus; `None` means no weather signal and never scores.
pub fn weather_points(place: &Place, precipitation_likely: Option<bool>) -> f64 {
    match (precipitation_likely, place.indoor_outdoor) {
        (Some(true), IndoorOutdoor::Indoor) | (Some(false), IndoorOutdoor::Outdoor) => {
            WEATHER_POINTS
        }
        _ => 0.0,
    }
}

/// Total score of one place.
pub fn score<S: AsRef<str>>(place: &Place, selected: &[S], precipitation_likely: Option<bool>) -> f64 {
    category_points(place, selected) + weather_points(place, precipitation_likely) - place.distance_km
}

/// Scores and orders places. Deterministic: the same inputs always produce
/// the same order.
pub fn rank<S: AsRef<str>>(
    places: Vec<Place>,
    selected: &[S],
    precipitation_likely: Option<bool>,
) -> Vec<RankedPlace> {
    let mut ranked: Vec<RankedPlace> = places
        .into_iter()
        .map(|place| {
            let score = score(&place, selected, precipitation_likely);
            RankedPlace { place, score }
        })
        .collect();

    // Vec::sort_by is stable
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, distance_km: f64, env: IndoorOutdoor, categories: &[&str]) -> Place {
        Place {
            id: id.to_string(),
            name: id.to_string(),
            address: String::new(),
            lat: 0.0,
            lon: 0.0,
            distance_km,
            indoor_outdoor: env,
            categories: categories.iter().map(ToString::to_string).collect(),
        }
    }

    fn ids(ranked: &[RankedPlace]) -> Vec<&str> {
        ranked.iter().map(|r| r.place.id.as_str()).collect()
    }

    const NONE: &[&str] = &[];

    #[test]
    fn test_prefix_match_scenario_scores_nine_and_a_half() {
        let candidate = place(
            "trattoria",
            0.5,
            IndoorOutdoor::Mixed,
            &["catering.restaurant.italian.fine_dining"],
        );
        let selected = ["catering.restaurant.italian"];
        assert_eq!(score(&candidate, &selected, None), 9.5);
    }

    #[test]
    fn test_selected_category_counted_once_per_place() {
        let candidate = place(
            "food-hall",
            0.0,
            IndoorOutdoor::Mixed,
            &["catering.restaurant.italian", "catering.restaurant.pizza"],
        );
        assert_eq!(category_points(&candidate, &["catering.restaurant"]), 10.0);
        assert_eq!(
            category_points(&candidate, &["catering.restaurant", "catering.restaurant.pizza"]),
            20.0
        );
    }

    #[test]
    fn test_no_selected_categories_scores_weather_minus_distance() {
        let cases = [
            (IndoorOutdoor::Indoor, Some(true), 5.0),
            (IndoorOutdoor::Indoor, Some(false), 0.0),
            (IndoorOutdoor::Outdoor, Some(false), 5.0),
            (IndoorOutdoor::Outdoor, Some(true), 0.0),
            (IndoorOutdoor::Mixed, Some(true), 0.0),
            (IndoorOutdoor::Mixed, Some(false), 0.0),
            (IndoorOutdoor::Indoor, None, 0.0),
            (IndoorOutdoor::Outdoor, None, 0.0),
        ];
        for (env, precipitation, bonus) in cases {
            let p = place("x", 1.25, env, &["leisure.park"]);
            assert_eq!(score(&p, NONE, precipitation), bonus - 1.25, "{env:?} {precipitation:?}");
        }
    }

    #[test]
    fn test_closer_place_never_ranks_below_farther_twin() {
        let near = place("near", 0.3, IndoorOutdoor::Outdoor, &["leisure.park"]);
        let far = place("far", 2.7, IndoorOutdoor::Outdoor, &["leisure.park"]);

        let ranked = rank(vec![far.clone(), near.clone()], &["leisure.park"], Some(false));
        assert_eq!(ids(&ranked), vec!["near", "far"]);

        let ranked = rank(vec![near, far], &["leisure.park"], Some(false));
        assert_eq!(ids(&ranked), vec!["near", "far"]);
    }

    #[test]
    fn test_ties_keep_upstream_order() {
        let places = vec![
            place("a", 1.0, IndoorOutdoor::Mixed, &[]),
            place("b", 1.0, IndoorOutdoor::Mixed, &[]),
            place("c", 1.0, IndoorOutdoor::Mixed, &[]),
        ];
        assert_eq!(ids(&rank(places, NONE, None)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let places = vec![
            place("park", 1.0, IndoorOutdoor::Outdoor, &["leisure.park"]),
            place("museum", 0.8, IndoorOutdoor::Indoor, &["entertainment.museum"]),
            place("cafe", 0.2, IndoorOutdoor::Indoor, &["catering.cafe"]),
            place("pub", 0.2, IndoorOutdoor::Indoor, &["catering.pub"]),
        ];
        let selected = ["entertainment.museum", "catering.cafe"];

        let first = rank(places, &selected, Some(true));
        let again = rank(
            first.iter().map(|r| r.place.clone()).collect(),
            &selected,
            Some(true),
        );
        assert_eq!(ids(&first), ids(&again));
        assert_eq!(ids(&first), vec!["cafe", "museum", "pub", "park"]);
    }

    #[test]
    fn test_weather_flips_indoor_and_outdoor() {
        let places = vec![
            place("garden", 0.5, IndoorOutdoor::Outdoor, &[]),
            place("gallery", 0.5, IndoorOutdoor::Indoor, &[]),
        ];
        assert_eq!(ids(&rank(places.clone(), NONE, Some(true))), vec!["gallery", "garden"]);
        assert_eq!(ids(&rank(places, NONE, Some(false))), vec!["garden", "gallery"]);
    }
}
