//! Parameter structures for Waypoint operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI, MCP, etc.) without framework-specific derives or
//! dependencies. These structures provide a clean interface for passing data
//! between different layers of the application.
//!
//! ## Architecture: Parameter Wrapper Pattern
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers create wrapper structs that add framework-specific derives
//! (`clap::Args`, `schemars::JsonSchema`, ...) and convert to the core
//! parameters via `.into()`. JSON schema generation is only compiled when the
//! `schema` feature is enabled.
//!
//! Task, comment and readiness parameters carry an optional `plan_id`. When it
//! is absent the operation targets the current plan.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{CommentType, TaskStatus},
};

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanId {
    /// The ID of the plan to operate on
    pub id: String,
}

/// Optional plan selector; absent means the current plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanSelector {
    /// ID of the plan; defaults to the current plan
    #[serde(default)]
    pub plan_id: Option<String>,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Name of the plan (required)
    pub name: String,
    /// Optional description or objective of the plan
    pub description: Option<String>,
    /// Advisory notes attached to the plan
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Parameters for turning free-form text into a structured plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TextToPlan {
    /// Natural-language plan description
    pub text: String,
    /// Optional plan name; inferred from the text when absent
    pub name: Option<String>,
}

/// Parameters for updating plan metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlan {
    /// ID of the plan to update
    pub id: String,
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// Replacement notes list
    pub notes: Option<Vec<String>>,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// ID of the plan to delete
    pub id: String,
    /// Must be true, guards against accidental deletion
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTask {
    /// ID of the plan; defaults to the current plan
    #[serde(default)]
    pub plan_id: Option<String>,
    /// Title of the task (required)
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Optional sequence position
    pub order: Option<u32>,
    /// IDs or titles of sibling tasks this task depends on
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Addresses a single task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskRef {
    /// ID of the plan; defaults to the current plan
    #[serde(default)]
    pub plan_id: Option<String>,
    /// ID of the task
    pub task_id: String,
}

/// Parameters for updating task details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// ID of the plan; defaults to the current plan
    #[serde(default)]
    pub plan_id: Option<String>,
    /// ID of the task to update
    pub task_id: String,
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New status (Pending, Working, Pending For Review, Complete, Need Fixed)
    pub status: Option<String>,
    /// New order
    pub order: Option<u32>,
    /// Replacement dependency list
    pub dependencies: Option<Vec<String>>,
}

impl UpdateTask {
    /// Validates the free-form fields and parses the status.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the status is not a canonical
    /// status label or the title is blank.
    pub fn validate(&self) -> Result<Option<TaskStatus>> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(PlannerError::invalid_input("title").with_reason("Title cannot be empty"));
            }
        }

        self.status
            .as_deref()
            .map(|status| {
                status
                    .parse::<TaskStatus>()
                    .map_err(|reason| PlannerError::invalid_input("status").with_reason(reason))
            })
            .transpose()
    }
}

/// Parameters for changing only a task's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTaskStatus {
    /// ID of the plan; defaults to the current plan
    #[serde(default)]
    pub plan_id: Option<String>,
    /// ID of the task
    pub task_id: String,
    /// New status
    pub status: TaskStatus,
}

/// Parameters for adding a comment to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddComment {
    /// ID of the plan; defaults to the current plan
    #[serde(default)]
    pub plan_id: Option<String>,
    /// ID of the task to comment on
    pub task_id: String,
    /// Comment body
    pub content: String,
    /// Kind of comment (defaults to Note)
    #[serde(default, rename = "type")]
    pub comment_type: CommentType,
}

/// Parameters for removing a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RemoveComment {
    /// ID of the plan; defaults to the current plan
    #[serde(default)]
    pub plan_id: Option<String>,
    /// ID of the task holding the comment
    pub task_id: String,
    /// ID of the comment to remove
    pub comment_id: String,
}
