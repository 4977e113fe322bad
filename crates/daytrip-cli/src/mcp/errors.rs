//! Error handling utilities for MCP server

use daytrip_core::PlannerError;
use rmcp::ErrorData;

/// Converts a planner error into an MCP error. Caller mistakes become
/// invalid-params errors so the client can correct the request.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::PlanNotFound { .. } | PlannerError::LocationNotFound { .. } => {
            ErrorData::resource_not_found(text, None)
        }
        PlannerError::InvalidInput { .. }
        | PlannerError::PreferenceValidation { .. }
        | PlannerError::NoPlacesFound { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_error_codes() {
        let missing = to_mcp_error("Failed to get plan", &PlannerError::PlanNotFound { id: 7 });
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert!(missing.message.contains("Plan with ID 7 not found"));

        let invalid = to_mcp_error(
            "Failed to rename plan",
            &PlannerError::invalid_input("name").with_reason("Plan name cannot be empty"),
        );
        assert_eq!(invalid.code, ErrorCode::INVALID_PARAMS);

        let internal = to_mcp_error(
            "Failed to list plans",
            &PlannerError::Configuration {
                message: "Task join error".to_string(),
            },
        );
        assert_eq!(internal.code, ErrorCode::INTERNAL_ERROR);
    }
}
