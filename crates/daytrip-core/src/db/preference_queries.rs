//! User preference storage.

use rusqlite::{OptionalExtension, params};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{CategorySelection, PreferenceProfile},
    taxonomy::Taxonomy,
};

const SELECT_PREFERENCES_SQL: &str =
    "SELECT radius_km, categories FROM user_preferences WHERE user_id = ?1";
const UPSERT_PREFERENCES_SQL: &str = "INSERT INTO user_preferences (user_id, radius_km, categories) VALUES (?1, ?2, ?3) \
     ON CONFLICT(user_id) DO UPDATE SET radius_km = excluded.radius_km, categories = excluded.categories";

impl super::Database {
    /// Stored preferences for a user, or `None` if nothing was saved yet.
    pub fn get_preferences(
        &self,
        user_id: &str,
        taxonomy: &Taxonomy,
    ) -> Result<Option<PreferenceProfile>> {
        let row: Option<(f64, String)> = self
            .connection
            .query_row(SELECT_PREFERENCES_SQL, params![user_id], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query preferences")?;

        Ok(row.map(|(radius_km, categories)| PreferenceProfile {
            user_id: user_id.to_string(),
            radius_km,
            categories: CategorySelection::from_snapshot(&categories, taxonomy),
        }))
    }

    /// Inserts or replaces a user's preferences. Callers validate first.
    pub fn save_preferences(&mut self, profile: &PreferenceProfile) -> Result<()> {
        self.connection
            .execute(
                UPSERT_PREFERENCES_SQL,
                params![
                    profile.user_id,
                    profile.radius_km,
                    profile.categories.to_snapshot()
                ],
            )
            .db_context("Failed to save preferences")?;
        Ok(())
    }
}
