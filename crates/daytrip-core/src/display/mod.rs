//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers. Everything
//! renders as markdown for the terminal renderer and the MCP server.
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries, Categories)
//! - [`results`]: Operation result types (UpdateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Clock, distance and travel time formatting
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use daytrip_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Preferences saved".to_string());
//! assert_eq!(status.to_string(), "Success: Preferences saved\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Categories, PlanSummaries};
pub use datetime::{ClockTime, Distance, TravelTime};
pub use results::{DeleteResult, UpdateResult};
pub use status::OperationStatus;
