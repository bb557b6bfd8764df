//! MCP tool handlers implementation
//!
//! Tool parameters reuse the core parameter types, which derive
//! `JsonSchema` through the core `schema` feature. Only `create_plan` has an
//! MCP-specific shape, since it folds plain creation and text parsing into
//! one tool.

use std::sync::Arc;

use log::debug;
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use waypoint_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params as core, Planner,
};

use super::errors::to_mcp_error;

pub type PlanId = core::PlanId;
pub type PlanSelector = core::PlanSelector;
pub type UpdateTaskStatus = core::UpdateTaskStatus;
pub type AddComment = core::AddComment;
pub type RemoveComment = core::RemoveComment;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Parameters for the `create_plan` tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreatePlan {
    /// The plan name, briefly describing the overall goal of the plan
    pub name: String,
    /// Optional summary of the plan
    #[serde(default)]
    pub description: Option<String>,
    /// Plan text to parse into a structured task list
    #[serde(default)]
    pub text: Option<String>,
}

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }

    pub async fn create_plan(&self, params: CreatePlan) -> McpResult {
        debug!("create_plan: {params:?}");

        let text = params.text.filter(|text| !text.trim().is_empty());
        let plan = match text {
            Some(text) => {
                let plan = self
                    .planner
                    .create_plan_from_text(&core::TextToPlan {
                        text,
                        name: Some(params.name),
                    })
                    .await
                    .map_err(|e| to_mcp_error("Failed to create plan", &e))?;
                match params.description {
                    Some(description) => self
                        .planner
                        .update_plan(&core::UpdatePlan {
                            id: plan.id,
                            description: Some(description),
                            ..Default::default()
                        })
                        .await
                        .map_err(|e| to_mcp_error("Failed to set plan description", &e))?,
                    None => plan,
                }
            }
            None => {
                let plan = self
                    .planner
                    .create_plan(&core::CreatePlan {
                        name: params.name,
                        description: params.description,
                        notes: Vec::new(),
                    })
                    .await
                    .map_err(|e| to_mcp_error("Failed to create plan", &e))?;
                self.planner
                    .set_current_plan(&core::PlanId { id: plan.id })
                    .await
                    .map_err(|e| to_mcp_error("Failed to select plan", &e))?
            }
        };

        text_result(CreateResult::new(plan).to_string())
    }

    pub async fn list_plans(&self) -> McpResult {
        let summaries = self
            .planner
            .list_plans_summary()
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        if summaries.is_empty() {
            return text_result(summaries.to_string());
        }
        text_result(format!("# Plans\n\n{summaries}"))
    }

    pub async fn show_plan(&self, params: PlanSelector) -> McpResult {
        debug!("show_plan: {params:?}");

        let plan = self
            .planner
            .show_plan(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to show plan", &e))?;
        text_result(plan.to_string())
    }

    pub async fn set_current_plan(&self, params: PlanId) -> McpResult {
        debug!("set_current_plan: {params:?}");

        let plan = self
            .planner
            .set_current_plan(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to set current plan", &e))?;
        text_result(
            OperationStatus::success(format!("Now tracking plan '{}' (ID: {})", plan.name, plan.id))
                .to_string(),
        )
    }

    pub async fn get_current_plan_tasks(&self, params: PlanSelector) -> McpResult {
        debug!("get_current_plan_tasks: {params:?}");

        let tasks = self
            .planner
            .list_tasks(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to get tasks", &e))?;
        text_result(tasks.to_string())
    }

    pub async fn get_next_tasks(&self, params: PlanSelector) -> McpResult {
        debug!("get_next_tasks: {params:?}");

        let ready = self
            .planner
            .next_tasks(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to get next tasks", &e))?;
        text_result(ready.to_string())
    }

    pub async fn update_task_status(&self, params: UpdateTaskStatus) -> McpResult {
        debug!("update_task_status: {params:?}");

        let task = self
            .planner
            .update_task_status(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to update task status", &e))?;
        let changes = vec![format!("Changed status to {}", task.status)];
        text_result(UpdateResult::with_changes(task, changes).to_string())
    }

    pub async fn add_comment(&self, params: AddComment) -> McpResult {
        debug!("add_comment: {params:?}");

        let comment = self
            .planner
            .add_comment(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to add comment", &e))?;
        text_result(CreateResult::new(comment).to_string())
    }

    pub async fn remove_comment(&self, params: RemoveComment) -> McpResult {
        debug!("remove_comment: {params:?}");

        let comment = self
            .planner
            .delete_comment(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to remove comment", &e))?;
        text_result(DeleteResult::new(comment).to_string())
    }
}
