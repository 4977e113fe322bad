//! MCP server implementation for Daytrip
//!
//! Exposes saved plans, preferences, place search and trip building to AI
//! assistants over the Model Context Protocol.

use std::sync::Arc;

use anyhow::Result;
use daytrip_core::Planner;
use log::{debug, error, info};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::signal::unix::{SignalKind, signal};

pub mod errors;
pub mod handlers;

pub use handlers::{
    BuildTrip, GetPreferences, Id, ListPlans, McpResult, RegeneratePlan, RenamePlan,
    SearchPlaces, UpdatePreferences, WeatherQuery,
};

/// MCP server for Daytrip
///
/// Planner operations take `&self` and serialize their own writes, so the
/// planner is shared without a lock.
#[derive(Clone)]
pub struct DaytripMcpServer {
    planner: Arc<Planner>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DaytripMcpServer {
    /// Create a new Daytrip MCP server
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(Arc::clone(&self.planner))
    }

    #[tool(
        name = "list_plans",
        description = "List a user's saved day-trip plans, most recent date first. Returns each plan's ID, name, date, start time, starting point, number of stops and total walking distance."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show a saved plan by ID: its stops in visiting order with time windows, the walking legs between them with turn-by-turn steps, and the radius and interests it was built with."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "rename_plan",
        description = "Rename a saved plan. The name must not be empty. Stops and route are unchanged."
    )]
    async fn rename_plan(&self, params: Parameters<RenamePlan>) -> McpResult {
        self.handlers().rename_plan(params).await
    }

    #[tool(
        name = "regenerate_plan",
        description = "Rebuild a saved plan from new picks. Places are searched again around the plan's starting point with the radius and interests it was saved with; date, start time and name are kept. Set save=true to write the result over the saved plan under the same ID."
    )]
    async fn regenerate_plan(&self, params: Parameters<RegeneratePlan>) -> McpResult {
        self.handlers().regenerate_plan(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a saved plan with its stops and route. This operation cannot be undone."
    )]
    async fn delete_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_plan(params).await
    }

    #[tool(
        name = "get_preferences",
        description = "Show a user's search radius (km) and selected interests. Users without stored preferences get a 2 km radius and provider default interests."
    )]
    async fn get_preferences(&self, params: Parameters<GetPreferences>) -> McpResult {
        self.handlers().get_preferences(params).await
    }

    #[tool(
        name = "update_preferences",
        description = "Change a user's radius (0 to 5 km) and/or interests. Interests are sub-categories from list_categories; select none or at least three. Omitted fields keep their stored value."
    )]
    async fn update_preferences(&self, params: Parameters<UpdatePreferences>) -> McpResult {
        self.handlers().update_preferences(params).await
    }

    #[tool(
        name = "weather_advice",
        description = "Clothing, sun and rain advice for a location on a date (YYYY-MM-DD), and whether indoor or outdoor places are favoured. Reports when no forecast is available."
    )]
    async fn weather_advice(&self, params: Parameters<WeatherQuery>) -> McpResult {
        self.handlers().weather_advice(params).await
    }

    #[tool(
        name = "search_places",
        description = "Find and rank places around a location for a date. Ranking combines the user's interests, the weather (indoor places on rainy days) and distance. Radius and categories override stored preferences for this search only."
    )]
    async fn search_places(&self, params: Parameters<SearchPlaces>) -> McpResult {
        self.handlers().search_places(params).await
    }

    #[tool(
        name = "build_trip",
        description = "Search places and build a timed walking itinerary starting at start_time (HH:MM). Give place IDs from search_places in picks, or let the top ranked places be used. Places that would end after the day-end cutoff are left out. Set save=true to store the plan."
    )]
    async fn build_trip(&self, params: Parameters<BuildTrip>) -> McpResult {
        self.handlers().build_trip(params).await
    }

    #[tool(
        name = "list_categories",
        description = "List the selectable interests grouped by main category, with whether each is typically indoor or outdoor."
    )]
    async fn list_categories(&self) -> McpResult {
        self.handlers().list_categories()
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DaytripMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "daytrip".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(r#"Daytrip plans walkable day trips.

## Core Concepts
- **Places**: points of interest found around a starting location, ranked by the user's interests, the weather and distance
- **Plans**: a named day out with ordered stops, each with a time window, and the walking legs between them

## Workflow
1. `list_categories` and `update_preferences` to choose interests and a radius
2. `search_places` to see ranked places and the weather advice
3. `build_trip` with picks from the search (save=true to keep it)
4. `list_plans`, `show_plan`, `rename_plan`, `delete_plan` to manage saved plans
5. `regenerate_plan` to swap the stops of a saved plan (save=true to keep it)

Dates are YYYY-MM-DD and times HH:MM. Every stop ends before the day-end cutoff; when places do not fit, the result says so."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: DaytripMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting Daytrip MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrip_core::PlannerBuilder;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_server_registers_all_tools() {
        let temp_dir = TempDir::new().unwrap();
        let planner = PlannerBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .unwrap();

        let server = DaytripMcpServer::new(planner);
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "build_trip",
                "delete_plan",
                "get_preferences",
                "list_categories",
                "list_plans",
                "regenerate_plan",
                "rename_plan",
                "search_places",
                "show_plan",
                "update_preferences",
                "weather_advice",
            ]
        );
        assert_eq!(server.get_info().server_info.name, "daytrip");
    }
}
