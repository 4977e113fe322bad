//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Columns added to `plans` after the first release.
const PLAN_COLUMN_MIGRATIONS: &[(&str, &str)] = &[
    (
        "snapshot_radius_km",
        "ALTER TABLE plans ADD COLUMN snapshot_radius_km REAL NOT NULL DEFAULT 2.0",
    ),
    (
        "snapshot_categories",
        "ALTER TABLE plans ADD COLUMN snapshot_categories TEXT NOT NULL DEFAULT ''",
    ),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> bool {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false)
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        for (column, sql) in PLAN_COLUMN_MIGRATIONS {
            if !self.has_column("plans", column) {
                log::info!("Migrating plans table: adding {column}");
                self.connection
                    .execute(sql, [])
                    .db_context("Failed to add snapshot column to plans table")?;
            }
        }

        Ok(())
    }
}
