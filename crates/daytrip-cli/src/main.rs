//! Daytrip CLI Application
//!
//! Command-line interface and MCP server for the day-trip planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use daytrip_core::{PlannerBuilder, gateway::Catalog};
use log::info;
use mcp::{DaytripMcpServer, run_stdio_server};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        catalog,
        user,
        no_color,
        command,
    } = Args::parse();

    let mut builder = PlannerBuilder::new().with_database_path(database_file);
    if let Some(path) = catalog {
        let catalog = Catalog::from_path(&path)
            .with_context(|| format!("Failed to load place catalog {}", path.display()))?;
        builder = builder.with_catalog(catalog);
    }
    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Daytrip started for user {user}");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer, user)
                .handle_plan_command(command)
                .await
        }
        Some(Prefs { command }) => {
            Cli::new(planner, renderer, user)
                .handle_prefs_command(command)
                .await
        }
        Some(Trip { command }) => {
            Cli::new(planner, renderer, user)
                .handle_trip_command(command)
                .await
        }
        Some(Advise(args)) => Cli::new(planner, renderer, user).advise(args).await,
        Some(Categories) => Cli::new(planner, renderer, user).categories(),
        Some(Serve) => {
            info!("Starting Daytrip MCP server");
            run_stdio_server(DaytripMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(planner, renderer, user).list_plans().await,
    }
}
