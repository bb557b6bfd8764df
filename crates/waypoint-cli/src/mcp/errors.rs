//! Error handling utilities for MCP server

use rmcp::ErrorData;
use waypoint_core::PlannerError;

/// Converts a planner error to an MCP error, prefixed with `message`.
///
/// Errors the caller can fix (bad input, unknown IDs, no current plan) are
/// reported as invalid parameters; everything else is internal.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::InvalidInput { .. }
        | PlannerError::PlanNotFound { .. }
        | PlannerError::TaskNotFound { .. }
        | PlannerError::CommentNotFound { .. }
        | PlannerError::NoCurrentPlan => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
