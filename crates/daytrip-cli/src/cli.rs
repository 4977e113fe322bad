//! Command-line interface definitions and command handlers
//!
//! Argument structures use clap's derive API and convert into the core
//! parameter types, so the core stays free of clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → Display → Renderer
//! ```
//!
//! Most core parameters carry a `user_id`. The CLI takes it from the global
//! `--user` flag, so the wrappers convert with `into_params(user)` instead of
//! a plain `From` impl.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use daytrip_core::{
    Categories, DeleteResult, OperationStatus, Planner, UpdateResult,
    params::{
        BuildTrip, GetPreferences, Id, ListPlans, RegeneratePlan, RenamePlan, SearchPlaces,
        UpdatePreferences, WeatherQuery,
    },
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Plan commands
// ============================================================================

/// Show a saved plan with its stops and walking legs
#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(help = "ID of the plan to show")]
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Rename a saved plan
#[derive(Args)]
pub struct RenamePlanArgs {
    #[arg(help = "ID of the plan to rename")]
    pub id: u64,
    /// New name
    pub name: String,
}

impl From<RenamePlanArgs> for RenamePlan {
    fn from(val: RenamePlanArgs) -> Self {
        RenamePlan {
            id: val.id,
            name: val.name,
        }
    }
}

/// Rebuild a saved plan from new picks, keeping its date, start and origin
#[derive(Args)]
pub struct RegeneratePlanArgs {
    #[arg(help = "ID of the plan to regenerate")]
    pub id: u64,
    /// Place IDs to visit, comma-separated, in the order you prefer them
    #[arg(short, long, value_delimiter = ',')]
    pub pick: Vec<String>,
    /// Number of top ranked places to take when nothing is picked
    #[arg(long)]
    pub top: Option<usize>,
    /// Write the rebuilt plan over the saved one
    #[arg(long)]
    pub save: bool,
}

impl From<RegeneratePlanArgs> for RegeneratePlan {
    fn from(val: RegeneratePlanArgs) -> Self {
        RegeneratePlan {
            id: val.id,
            picks: val.pick,
            top: val.top,
            save: val.save,
        }
    }
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    #[arg(help = "ID of the plan to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List saved plans, most recent date first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a saved plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Rename a saved plan
    #[command(alias = "mv")]
    Rename(RenamePlanArgs),
    /// Rebuild a saved plan from new picks
    #[command(alias = "regen")]
    Regenerate(RegeneratePlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
}

// ============================================================================
// Preference commands
// ============================================================================

/// Change the default radius or interests
#[derive(Args)]
pub struct SetPrefsArgs {
    /// Search radius in kilometres (0 to 5)
    #[arg(short, long)]
    pub radius: Option<f64>,
    /// Interests as comma-separated sub-categories, e.g.
    /// catering.cafe,leisure.park,entertainment.museum
    #[arg(short, long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,
    /// Clear all interests and use provider defaults
    #[arg(long, conflicts_with = "categories")]
    pub clear_categories: bool,
}

impl SetPrefsArgs {
    pub fn into_params(self, user_id: String) -> UpdatePreferences {
        let categories = if self.clear_categories {
            Some(Vec::new())
        } else {
            self.categories
        };
        UpdatePreferences {
            user_id,
            radius_km: self.radius,
            categories,
        }
    }
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show the current preferences
    Show,
    /// Change preferences; omitted options keep their value
    Set(SetPrefsArgs),
}

// ============================================================================
// Trip commands
// ============================================================================

/// Search and rank places around a location
#[derive(Args)]
pub struct SearchArgs {
    /// Starting location, e.g. "Ghent" or "51.05,3.72"
    pub location: String,
    /// Trip date, YYYY-MM-DD
    #[arg(short, long)]
    pub date: String,
    /// Override the stored radius for this search
    #[arg(short, long)]
    pub radius: Option<f64>,
    /// Override the stored interests for this search (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,
}

impl SearchArgs {
    pub fn into_params(self, user_id: String) -> SearchPlaces {
        SearchPlaces {
            user_id,
            location: self.location,
            date: self.date,
            radius_km: self.radius,
            categories: self.categories,
        }
    }
}

/// Build a timed walking itinerary
#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub search: SearchArgs,
    /// Name of the plan
    #[arg(short, long, default_value = "Day trip")]
    pub name: String,
    /// Start of the day, HH:MM
    #[arg(short, long, default_value = "10:00")]
    pub start: String,
    /// Place IDs to visit, comma-separated, in the order you prefer them
    #[arg(short, long, value_delimiter = ',')]
    pub pick: Vec<String>,
    /// Number of top ranked places to take when nothing is picked
    #[arg(long)]
    pub top: Option<usize>,
    /// Save the plan after building it
    #[arg(long)]
    pub save: bool,
}

impl BuildArgs {
    pub fn into_params(self, user_id: String) -> BuildTrip {
        BuildTrip {
            search: self.search.into_params(user_id),
            name: self.name,
            start_time: self.start,
            picks: self.pick,
            top: self.top,
            save: self.save,
        }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Search and rank places
    #[command(alias = "s")]
    Search(SearchArgs),
    /// Build an itinerary from the top ranked or picked places
    #[command(alias = "b")]
    Build(BuildArgs),
}

/// Weather advice for a location and date
#[derive(Args)]
pub struct AdviseArgs {
    pub location: String,
    /// Trip date, YYYY-MM-DD
    #[arg(short, long)]
    pub date: String,
}

impl From<AdviseArgs> for WeatherQuery {
    fn from(val: AdviseArgs) -> Self {
        WeatherQuery {
            location: val.location,
            date: val.date,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs one command against the planner and renders its markdown output.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    user: String,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, user: String) -> Self {
        Self {
            planner,
            renderer,
            user,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let plan = self
                    .planner
                    .show_plan(&args.into())
                    .await
                    .context("Failed to show plan")?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Rename(args) => {
                let params: RenamePlan = args.into();
                let plan = self
                    .planner
                    .rename_plan(&params)
                    .await
                    .context("Failed to rename plan")?;
                let result =
                    UpdateResult::with_changes(plan, vec![format!("name: {}", params.name.trim())]);
                self.renderer.render(&result.to_string())
            }
            PlanCommands::Regenerate(args) => {
                let draft = self
                    .planner
                    .regenerate_plan(&args.into())
                    .await
                    .context("Failed to regenerate plan")?;
                self.renderer.render(&draft.to_string())
            }
            PlanCommands::Delete(args) => {
                if !args.confirm {
                    let status = OperationStatus::failure(format!(
                        "Refusing to delete plan {} without --confirm",
                        args.id
                    ));
                    return self.renderer.render(&status.to_string());
                }
                let plan = self
                    .planner
                    .delete_plan(&Id { id: args.id })
                    .await
                    .context("Failed to delete plan")?;
                self.renderer.render(&DeleteResult::new(plan).to_string())
            }
        }
    }

    pub async fn handle_prefs_command(&self, command: PrefsCommands) -> Result<()> {
        let profile = match command {
            PrefsCommands::Show => self
                .planner
                .get_preferences(&GetPreferences {
                    user_id: self.user.clone(),
                })
                .await
                .context("Failed to load preferences")?,
            PrefsCommands::Set(args) => self
                .planner
                .update_preferences(&args.into_params(self.user.clone()))
                .await
                .context("Failed to update preferences")?,
        };
        self.renderer.render(&profile.to_string())
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Search(args) => {
                let results = self
                    .planner
                    .search(&args.into_params(self.user.clone()))
                    .await
                    .context("Search failed")?;
                self.renderer.render(&results.to_string())
            }
            TripCommands::Build(args) => {
                let draft = self
                    .planner
                    .plan_trip(&args.into_params(self.user.clone()))
                    .await
                    .context("Failed to build trip")?;
                self.renderer.render(&draft.to_string())
            }
        }
    }

    pub async fn advise(&self, args: AdviseArgs) -> Result<()> {
        let advice = self
            .planner
            .weather_advice(&args.into())
            .await
            .context("Failed to get weather advice")?;
        self.renderer.render(&advice.to_string())
    }

    pub fn categories(&self) -> Result<()> {
        self.renderer
            .render(&Categories(self.planner.taxonomy()).to_string())
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .planner
            .list_plans(&ListPlans {
                user_id: self.user.clone(),
            })
            .await
            .context("Failed to list plans")?;
        self.renderer
            .render(&format!("# Plans for {}\n\n{summaries}", self.user))
    }
}

