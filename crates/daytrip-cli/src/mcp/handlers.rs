//! MCP tool handlers implementation

use std::sync::Arc;

use daytrip_core::{
    Planner,
    display::{Categories, DeleteResult, UpdateResult},
    params as core,
};
use log::debug;
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// Core parameter types derive JsonSchema only behind the `schema` feature and
// know nothing about MCP. The transparent wrapper passes deserialization and
// schema generation straight through to the wrapped core type.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type RenamePlan = McpParams<core::RenamePlan>;
pub type RegeneratePlan = McpParams<core::RegeneratePlan>;
pub type GetPreferences = McpParams<core::GetPreferences>;
pub type UpdatePreferences = McpParams<core::UpdatePreferences>;
pub type WeatherQuery = McpParams<core::WeatherQuery>;
pub type SearchPlaces = McpParams<core::SearchPlaces>;
pub type BuildTrip = McpParams<core::BuildTrip>;

pub type McpResult = Result<CallToolResult, McpError>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {params:?}");

        let inner_params = params.as_ref();
        let summaries = self
            .planner
            .list_plans(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        let title = if summaries.is_empty() {
            format!("No saved plans for {}", inner_params.user_id)
        } else {
            format!("Plans for {}", inner_params.user_id)
        };
        text(format!("# {title}\n\n{summaries}"))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let plan = self
            .planner
            .show_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?;
        text(plan)
    }

    pub async fn rename_plan(&self, Parameters(params): Parameters<RenamePlan>) -> McpResult {
        debug!("rename_plan: {params:?}");

        let plan = self
            .planner
            .rename_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to rename plan", &e))?;
        let change = format!("name: {}", plan.name);
        text(UpdateResult::with_changes(plan, vec![change]))
    }

    pub async fn regenerate_plan(
        &self,
        Parameters(params): Parameters<RegeneratePlan>,
    ) -> McpResult {
        debug!("regenerate_plan: {params:?}");

        let draft = self
            .planner
            .regenerate_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to regenerate plan", &e))?;
        text(draft)
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_plan: {params:?}");

        let plan = self
            .planner
            .delete_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?;
        text(DeleteResult::new(plan))
    }

    pub async fn get_preferences(
        &self,
        Parameters(params): Parameters<GetPreferences>,
    ) -> McpResult {
        debug!("get_preferences: {params:?}");

        let profile = self
            .planner
            .get_preferences(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load preferences", &e))?;
        text(profile)
    }

    pub async fn update_preferences(
        &self,
        Parameters(params): Parameters<UpdatePreferences>,
    ) -> McpResult {
        debug!("update_preferences: {params:?}");

        let profile = self
            .planner
            .update_preferences(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update preferences", &e))?;
        text(profile)
    }

    pub async fn weather_advice(&self, Parameters(params): Parameters<WeatherQuery>) -> McpResult {
        debug!("weather_advice: {params:?}");

        let advice = self
            .planner
            .weather_advice(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get weather advice", &e))?;
        text(advice)
    }

    pub async fn search_places(&self, Parameters(params): Parameters<SearchPlaces>) -> McpResult {
        debug!("search_places: {params:?}");

        let results = self
            .planner
            .search(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Search failed", &e))?;
        text(results)
    }

    pub async fn build_trip(&self, Parameters(params): Parameters<BuildTrip>) -> McpResult {
        debug!("build_trip: {params:?}");

        let draft = self
            .planner
            .plan_trip(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build trip", &e))?;
        text(draft)
    }

    pub fn list_categories(&self) -> McpResult {
        text(Categories(self.planner.taxonomy()))
    }
}
