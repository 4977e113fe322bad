//! Preference operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    error::Result,
    models::{CategorySelection, PreferenceProfile},
    params::{GetPreferences, UpdatePreferences},
};

impl Planner {
    /// Stored preferences, or the defaults for a user who never saved any.
    pub async fn get_preferences(&self, params: &GetPreferences) -> Result<PreferenceProfile> {
        let user_id = params.user_id.clone();

        self.with_database(move |db, taxonomy| {
            Ok(db
                .get_preferences(&user_id, taxonomy)?
                .unwrap_or_else(|| PreferenceProfile::defaults_for(user_id)))
        })
        .await
    }

    /// Applies the given changes to the stored profile, validates the result
    /// and stores it. Nothing is written when validation fails.
    pub async fn update_preferences(&self, params: &UpdatePreferences) -> Result<PreferenceProfile> {
        let mut profile = self
            .get_preferences(&GetPreferences {
                user_id: params.user_id.clone(),
            })
            .await?;

        if let Some(radius_km) = params.radius_km {
            profile.radius_km = radius_km;
        }
        if let Some(categories) = &params.categories {
            profile.categories = CategorySelection::from_sub_categories(&self.taxonomy, categories);
        }
        profile.validate(&self.taxonomy)?;

        let stored = profile.clone();
        self.with_database(move |db, _| db.save_preferences(&stored))
            .await?;
        info!(
            "Saved preferences for {}: {} km, {} interests",
            profile.user_id,
            profile.radius_km,
            profile.categories.total_selected()
        );
        Ok(profile)
    }
}
