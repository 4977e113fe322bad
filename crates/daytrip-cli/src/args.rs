use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AdviseArgs, PlanCommands, PrefsCommands, TripCommands};

/// Plan walkable day trips around a location
///
/// Daytrip searches places near a starting point, ranks them by your
/// interests, the weather and distance, and turns your picks into a timed
/// walking itinerary that can be saved and revisited. It also runs as an MCP
/// server so AI assistants can read and manage saved plans.
#[derive(Parser)]
#[command(version, about, name = "dt")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/daytrip/daytrip.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// JSON place catalog used for geocoding, places and weather
    #[arg(long, global = true, env = "DAYTRIP_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// User whose plans and preferences are used
    #[arg(long, global = true, env = "DAYTRIP_USER", default_value = "local")]
    pub user: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Daytrip CLI
///
/// - `plan`: saved plans (list, show, rename, regenerate, delete)
/// - `prefs`: the search radius and interests used by default
/// - `trip`: search places and build itineraries
/// - `advise`: weather advice for a day out
/// - `categories`: the selectable interests
/// - `serve`: start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage saved plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
    /// Search places and build trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Weather advice for a location and date
    Advise(AdviseArgs),
    /// List selectable interests
    Categories,
    /// Start the MCP server
    Serve,
}
