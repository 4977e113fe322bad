//! Two-level category vocabulary (main category → sub-categories).
//!
//! Categories are dotted paths such as `catering.restaurant.italian`. A
//! [`Taxonomy`] is an ordinary value: build one with [`Taxonomy::standard`]
//! or [`Taxonomy::new`] and hand it to the components that need it.

use serde::{Deserialize, Serialize};

use crate::models::IndoorOutdoor;

/// Key reported for categories that belong to no known main category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Returns true when `prefix` equals `category` or is one of its dotted-path
/// ancestors (`catering.restaurant` is a prefix of
/// `catering.restaurant.italian`, `catering.rest` is not).
pub fn is_dotted_prefix(prefix: &str, category: &str) -> bool {
    match category.strip_prefix(prefix) {
        Some("") => !prefix.is_empty(),
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// A selectable sub-category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    /// Dotted path, e.g. `leisure.park.garden`
    pub path: String,
    /// Human readable label
    pub label: String,
    /// Typical setting of places carrying this category
    pub environment: IndoorOutdoor,
}

/// A main category and its ordered sub-categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainCategory {
    /// Stable key, also the first segment of every sub-category path
    pub key: String,
    /// Human readable label
    pub label: String,
    pub sub_categories: Vec<SubCategory>,
}

impl MainCategory {
    pub fn sub_category(&self, path: &str) -> Option<&SubCategory> {
        self.sub_categories.iter().find(|sub| sub.path == path)
    }
}

/// Immutable category vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    mains: Vec<MainCategory>,
}

type Entry = (&'static str, &'static str, IndoorOutdoor);

const STANDARD: &[(&str, &str, &[Entry])] = {
    use IndoorOutdoor::{Indoor, Mixed, Outdoor};
    &[
        (
            "catering",
            "Food & Drink",
            &[
                ("catering.restaurant", "Restaurants", Indoor),
                ("catering.restaurant.italian", "Italian", Indoor),
                ("catering.restaurant.pizza", "Pizza", Indoor),
                ("catering.restaurant.seafood", "Seafood", Indoor),
                ("catering.cafe", "Cafés", Indoor),
                ("catering.bar", "Bars", Indoor),
                ("catering.pub", "Pubs", Indoor),
                ("catering.fast_food", "Fast food", Mixed),
                ("catering.ice_cream", "Ice cream", Mixed),
            ],
        ),
        (
            "entertainment",
            "Entertainment & Culture",
            &[
                ("entertainment.museum", "Museums", Indoor),
                ("entertainment.culture.theatre", "Theatres", Indoor),
                ("entertainment.culture.gallery", "Galleries", Indoor),
                ("entertainment.cinema", "Cinemas", Indoor),
                ("entertainment.aquarium", "Aquariums", Indoor),
                ("entertainment.zoo", "Zoos", Outdoor),
                ("entertainment.theme_park", "Theme parks", Outdoor),
                ("entertainment.escape_game", "Escape rooms", Indoor),
                ("entertainment.bowling_alley", "Bowling", Indoor),
            ],
        ),
        (
            "leisure",
            "Parks & Leisure",
            &[
                ("leisure.park", "Parks", Outdoor),
                ("leisure.park.garden", "Gardens", Outdoor),
                ("leisure.playground", "Playgrounds", Outdoor),
                ("leisure.picnic", "Picnic spots", Outdoor),
                ("leisure.spa", "Spas", Indoor),
            ],
        ),
        (
            "tourism",
            "Sightseeing",
            &[
                ("tourism.attraction", "Attractions", Mixed),
                ("tourism.attraction.viewpoint", "Viewpoints", Outdoor),
                ("tourism.sights", "Sights", Mixed),
                ("tourism.sights.castle", "Castles", Mixed),
                ("tourism.sights.place_of_worship", "Places of worship", Indoor),
                ("tourism.sights.memorial", "Memorials", Outdoor),
                ("tourism.sights.bridge", "Bridges", Outdoor),
            ],
        ),
        (
            "commercial",
            "Shopping",
            &[
                ("commercial.shopping_mall", "Shopping malls", Indoor),
                ("commercial.marketplace", "Markets", Outdoor),
                ("commercial.books", "Bookshops", Indoor),
                ("commercial.gift_and_souvenir", "Souvenirs", Indoor),
                ("commercial.clothing", "Clothing", Indoor),
            ],
        ),
        (
            "natural",
            "Nature",
            &[
                ("natural.beach", "Beaches", Outdoor),
                ("natural.forest", "Forests", Outdoor),
                ("natural.water", "Lakes & rivers", Outdoor),
                ("natural.mountain.peak", "Peaks", Outdoor),
            ],
        ),
        (
            "sport",
            "Sport",
            &[
                ("sport.stadium", "Stadiums", Mixed),
                ("sport.swimming_pool", "Swimming pools", Indoor),
                ("sport.fitness", "Fitness", Indoor),
                ("sport.ice_rink", "Ice rinks", Indoor),
            ],
        ),
    ]
};

impl Taxonomy {
    /// Creates a taxonomy from explicit main categories.
    pub fn new(mains: Vec<MainCategory>) -> Self {
        Self { mains }
    }

    /// The vocabulary used by the bundled gateways and the CLI.
    pub fn standard() -> Self {
        let mains = STANDARD
            .iter()
            .map(|(key, label, subs)| MainCategory {
                key: (*key).to_string(),
                label: (*label).to_string(),
                sub_categories: subs
                    .iter()
                    .map(|(path, label, environment)| SubCategory {
                        path: (*path).to_string(),
                        label: (*label).to_string(),
                        environment: *environment,
                    })
                    .collect(),
            })
            .collect();
        Self { mains }
    }

    pub fn main_categories(&self) -> &[MainCategory] {
        &self.mains
    }

    pub fn main_category(&self, key: &str) -> Option<&MainCategory> {
        self.mains.iter().find(|main| main.key == key)
    }

    /// Resolves any category path to its main category. The first path
    /// segment decides membership.
    pub fn resolve(&self, category: &str) -> Option<&MainCategory> {
        let head = category.split('.').next().unwrap_or_default();
        self.main_category(head)
    }

    /// Main category key for a path, or [`UNCATEGORIZED`].
    pub fn main_key_of(&self, category: &str) -> &str {
        self.resolve(category)
            .map_or(UNCATEGORIZED, |main| main.key.as_str())
    }

    /// Whether `sub` is a selectable sub-category of `main`.
    pub fn is_valid_sub_category(&self, main: &str, sub: &str) -> bool {
        self.main_category(main)
            .is_some_and(|m| m.sub_category(sub).is_some())
    }

    /// Most specific known sub-category that is a dotted prefix of `category`.
    pub fn closest_sub_category(&self, category: &str) -> Option<&SubCategory> {
        self.resolve(category)?
            .sub_categories
            .iter()
            .filter(|sub| is_dotted_prefix(&sub.path, category))
            .max_by_key(|sub| sub.path.len())
    }

    /// Classifies a place from its categories: indoor or outdoor only when
    /// every recognised category agrees, mixed otherwise.
    pub fn environment_of<S: AsRef<str>>(&self, categories: &[S]) -> IndoorOutdoor {
        let mut environments = categories
            .iter()
            .filter_map(|c| self.closest_sub_category(c.as_ref()))
            .map(|sub| sub.environment);

        let Some(first) = environments.next() else {
            return IndoorOutdoor::Mixed;
        };
        if environments.all(|env| env == first) {
            first
        } else {
            IndoorOutdoor::Mixed
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_prefix() {
        assert!(is_dotted_prefix("catering.restaurant", "catering.restaurant"));
        assert!(is_dotted_prefix(
            "catering.restaurant.italian",
            "catering.restaurant.italian.fine_dining"
        ));
        assert!(!is_dotted_prefix("catering.rest", "catering.restaurant"));
        assert!(!is_dotted_prefix("catering.restaurant.italian", "catering.restaurant"));
        assert!(!is_dotted_prefix("", "catering"));
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.main_key_of("leisure.park.garden"), "leisure");
        assert_eq!(taxonomy.main_key_of("building.office"), UNCATEGORIZED);
        assert!(taxonomy.resolve("").is_none());
    }

    #[test]
    fn test_sub_category_validation() {
        let taxonomy = Taxonomy::standard();
        assert!(taxonomy.is_valid_sub_category("catering", "catering.cafe"));
        assert!(!taxonomy.is_valid_sub_category("leisure", "catering.cafe"));
        assert!(!taxonomy.is_valid_sub_category("catering", "catering.unknown"));
    }

    #[test]
    fn test_environment_classification() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(
            taxonomy.environment_of(&["entertainment.museum.art"]),
            IndoorOutdoor::Indoor
        );
        assert_eq!(
            taxonomy.environment_of(&["leisure.park", "natural.water"]),
            IndoorOutdoor::Outdoor
        );
        assert_eq!(
            taxonomy.environment_of(&["leisure.park", "catering.cafe"]),
            IndoorOutdoor::Mixed
        );
        assert_eq!(
            taxonomy.environment_of::<&str>(&[]),
            IndoorOutdoor::Mixed
        );
    }

    #[test]
    fn test_closest_sub_category_prefers_most_specific() {
        let taxonomy = Taxonomy::standard();
        let label = |category: &str| {
            taxonomy
                .closest_sub_category(category)
                .map(|sub| sub.label.as_str())
        };
        assert_eq!(label("catering.restaurant.italian.trattoria"), Some("Italian"));
        assert_eq!(label("catering.restaurant.thai"), Some("Restaurants"));
        assert_eq!(label("unknown.thing"), None);
    }
}
