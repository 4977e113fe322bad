//! Error types for the day-trip planner.
//!
//! Every core operation returns [`PlannerError`]. Collaborator failures are
//! converted at the boundary of the operation that made the call; only
//! weather and routing failures are absorbed (see [`PlannerError::is_degradation`]).

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Geocoding returned no match for the requested location
    #[error("Location '{query}' could not be found")]
    LocationNotFound { query: String },

    /// The places search came back empty
    #[error("No places found near {location}; increase the radius or change your interests")]
    NoPlacesFound { location: String },

    /// Weather data could not be obtained
    #[error("Weather unavailable: {reason}")]
    WeatherUnavailable { reason: String },

    /// Preference profile failed validation
    #[error("Invalid preferences: {reason}")]
    PreferenceValidation { reason: String },

    /// Routing collaborator failed or produced no route
    #[error("Route unavailable: {reason}")]
    RouteUnavailable { reason: String },

    /// Storage error during save or load
    #[error("Persistence failure: {message}")]
    Persistence {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },

    /// A collaborator reported a transient failure
    #[error("{gateway} gateway error: {message}")]
    Gateway {
        gateway: &'static str,
        message: String,
    },

    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),

    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating persistence errors with optional context.
pub struct PersistenceErrorBuilder {
    message: String,
}

impl PersistenceErrorBuilder {
    /// Create a new persistence error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source. The store's own message is
    /// appended so callers see it verbatim.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Persistence {
            message: format!("{}: {source}", self.message),
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for persistence errors.
    pub fn persistence(message: impl Into<String>) -> PersistenceErrorBuilder {
        PersistenceErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a preference validation error.
    pub fn preference(reason: impl Into<String>) -> Self {
        Self::PreferenceValidation {
            reason: reason.into(),
        }
    }

    /// Whether this error is a non-fatal degradation that callers absorb
    /// into the result instead of aborting.
    pub fn is_degradation(&self) -> bool {
        matches!(
            self,
            Self::WeatherUnavailable { .. } | Self::RouteUnavailable { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::persistence(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_message_passes_store_text_through() {
        let err = PlannerError::persistence("Failed to insert plan")
            .with_source(rusqlite::Error::InvalidQuery);
        let text = err.to_string();
        assert!(text.starts_with("Persistence failure: Failed to insert plan"));
        assert!(text.contains(&rusqlite::Error::InvalidQuery.to_string()));
    }

    #[test]
    fn test_no_places_message_is_actionable() {
        let err = PlannerError::NoPlacesFound {
            location: "Ghent".to_string(),
        };
        assert!(err.to_string().contains("increase the radius"));
    }

    #[test]
    fn test_degradations() {
        assert!(
            PlannerError::WeatherUnavailable {
                reason: "timeout".into()
            }
            .is_degradation()
        );
        assert!(
            PlannerError::RouteUnavailable {
                reason: "no routes".into()
            }
            .is_degradation()
        );
        assert!(!PlannerError::PlanNotFound { id: 3 }.is_degradation());
        assert!(!PlannerError::preference("too few").is_degradation());
    }
}
