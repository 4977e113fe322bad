//! Preference profile and the category snapshot grammar.
//!
//! Snapshots are stored as `main1:sub1,sub2|main2:sub1`. An empty selection
//! is the empty string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    taxonomy::Taxonomy,
};

/// Largest search radius a profile may carry, in kilometres.
pub const MAX_RADIUS_KM: f64 = 5.0;

/// Radius used for users who never saved preferences.
pub const DEFAULT_RADIUS_KM: f64 = 2.0;

/// Minimum number of sub-categories once the user selects any at all.
pub const MIN_SELECTED_CATEGORIES: usize = 3;

const MAIN_SEPARATOR: char = '|';
const KEY_SEPARATOR: char = ':';
const SUB_SEPARATOR: char = ',';

/// Selected sub-categories keyed by main category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategorySelection(BTreeMap<String, Vec<String>>);

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sub-category under `main`, keeping insertion order and
    /// ignoring duplicates.
    pub fn insert(&mut self, main: impl Into<String>, sub: impl Into<String>) {
        let sub = sub.into();
        let subs = self.0.entry(main.into()).or_default();
        if !subs.contains(&sub) {
            subs.push(sub);
        }
    }

    /// Builds a selection from bare sub-category paths, filing each under
    /// its main category.
    pub fn from_sub_categories<I, S>(taxonomy: &Taxonomy, subs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for sub in subs {
            let sub = sub.as_ref();
            selection.insert(taxonomy.main_key_of(sub), sub);
        }
        selection
    }

    pub fn is_empty(&self) -> bool {
        self.total_selected() == 0
    }

    /// Count of sub-categories across all main categories.
    pub fn total_selected(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn main_categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All selected sub-categories, main categories in key order.
    pub fn sub_categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.total_selected());
        for sub in self.0.values().flatten() {
            if !out.contains(sub) {
                out.push(sub.clone());
            }
        }
        out
    }

    /// Serializes to the snapshot grammar.
    pub fn to_snapshot(&self) -> String {
        self.0
            .iter()
            .filter(|(_, subs)| !subs.is_empty())
            .map(|(main, subs)| format!("{main}{KEY_SEPARATOR}{}", subs.join(",")))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Parses the snapshot grammar. Sub-categories the taxonomy does not
    /// list under their main category are dropped, and so are main
    /// categories left with nothing.
    pub fn from_snapshot(text: &str, taxonomy: &Taxonomy) -> Self {
        let mut selection = Self::new();
        for group in text.split(MAIN_SEPARATOR) {
            let Some((main, subs)) = group.split_once(KEY_SEPARATOR) else {
                continue;
            };
            let main = main.trim();
            for sub in subs.split(SUB_SEPARATOR).map(str::trim) {
                if taxonomy.is_valid_sub_category(main, sub) {
                    selection.insert(main, sub);
                }
            }
        }
        selection
    }
}

/// A user's search radius and interests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceProfile {
    pub user_id: String,

    /// Search radius in kilometres, within `0..=5`
    pub radius_km: f64,

    /// Empty means "use provider defaults"
    #[serde(default)]
    pub categories: CategorySelection,
}

impl PreferenceProfile {
    /// Profile for a user who has not saved any preferences yet.
    pub fn defaults_for(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            radius_km: DEFAULT_RADIUS_KM,
            categories: CategorySelection::new(),
        }
    }

    /// Validates the profile before it is stored or used for a search.
    pub fn validate(&self, taxonomy: &Taxonomy) -> Result<()> {
        if !self.radius_km.is_finite() || !(0.0..=MAX_RADIUS_KM).contains(&self.radius_km) {
            return Err(PlannerError::preference(format!(
                "radius must be between 0 and {MAX_RADIUS_KM} km, got {}",
                self.radius_km
            )));
        }

        for (main, subs) in self.categories.main_categories() {
            if let Some(sub) = subs
                .iter()
                .find(|sub| !taxonomy.is_valid_sub_category(main, sub))
            {
                return Err(PlannerError::preference(format!(
                    "'{sub}' is not a sub-category of '{main}'"
                )));
            }
        }

        // Zero selected means provider defaults, which is allowed
        let selected = self.categories.total_selected();
        if selected > 0 && selected < MIN_SELECTED_CATEGORIES {
            return Err(PlannerError::preference(format!(
                "select at least {MIN_SELECTED_CATEGORIES} interests, {selected} selected"
            )));
        }

        Ok(())
    }
}
