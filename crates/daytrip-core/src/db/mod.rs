//! Database operations and SQLite management for plans and preferences.
//!
//! A plan is stored as a row in `plans` plus a subtree of stops, a route
//! summary, legs and steps. The subtree is always written as a whole inside
//! one transaction (see [`Database::save_plan`]).

use std::path::Path;

use rusqlite::{Connection, types::Type};

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
pub mod preference_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parses a TEXT column, reporting failures as a conversion error on that
/// column.
fn parse_column<T>(value: String, column: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
