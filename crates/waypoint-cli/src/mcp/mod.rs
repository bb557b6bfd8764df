//! MCP server implementation for Waypoint
//!
//! Exposes the plan tracker over the Model Context Protocol on stdio, so AI
//! assistants can create plans from text, follow the current plan and report
//! progress on its tasks.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use waypoint_core::Planner;

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddComment, CreatePlan, McpResult, PlanId, PlanSelector, RemoveComment, UpdateTaskStatus,
};

const INSTRUCTIONS: &str = r#"Waypoint turns free-form project descriptions into structured plans and tells you which tasks are ready to work on.

## Core Concepts
- **Plans**: A named goal with a description, advisory notes and tasks
- **Tasks**: Units of work with a status (Pending, Working, Pending For Review, Complete, Need Fixed), an order and dependencies on sibling tasks
- **Current plan**: The plan task tools act on when no plan_id is given

## Workflow
1. Create a plan with `create_plan`, passing the plan text to have it parsed into tasks. The new plan becomes the current plan.
2. Ask `get_next_tasks` what can be worked on now. A task is ready when it is Pending or Need Fixed and every task it depends on is Complete.
3. Move tasks along with `update_task_status` (Pending → Working → Pending For Review → Complete, or Need Fixed after a failed review).
4. Record questions, issues and decisions with `add_comment`; clean up with `remove_comment`.

## Tool Categories
- **Plans**: create_plan, list_plans, show_plan, set_current_plan
- **Tasks**: get_current_plan_tasks, get_next_tasks, update_task_status
- **Comments**: add_comment, remove_comment"#;

/// MCP server for Waypoint
#[derive(Clone)]
pub struct WaypointMcpServer {
    planner: Arc<Planner>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaypointMcpServer {
    /// Create a new Waypoint MCP server
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
        name = "create_plan",
        description = "Create a new plan and make it the currently tracked plan. Provide a name (required), an optional description and optional plan text. When text is given it is parsed into a structured task list: numbered or bulleted items become tasks, 'depends on:' lines become dependencies, and 'Notes:' sections become advisory notes. Returns the created plan with its ID and tasks."
    )]
    async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List all plans with their IDs, descriptions and progress. The currently tracked plan is marked [current]."
    )]
    async fn list_plans(&self) -> McpResult {
        self.handlers().list_plans().await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with its notes and every task, including status, order, dependencies and comments. Defaults to the current plan when plan_id is omitted."
    )]
    async fn show_plan(&self, Parameters(params): Parameters<PlanSelector>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "set_current_plan",
        description = "Make the plan with the given ID the currently tracked plan. Task and comment tools act on this plan when no plan_id is passed."
    )]
    async fn set_current_plan(&self, Parameters(params): Parameters<PlanId>) -> McpResult {
        self.handlers().set_current_plan(params).await
    }

    #[tool(
        name = "get_current_plan_tasks",
        description = "Retrieve all tasks of the currently tracked plan (or of plan_id when given) with their IDs, descriptions, statuses, dependencies and comments. Fails when no plan is current."
    )]
    async fn get_current_plan_tasks(&self, Parameters(params): Parameters<PlanSelector>) -> McpResult {
        self.handlers().get_current_plan_tasks(params).await
    }

    #[tool(
        name = "get_next_tasks",
        description = "Identify the tasks that can be worked on now: tasks that are Pending or Need Fixed and whose dependencies are all Complete, sorted by order. Use after finishing a task to decide what to do next. Returns an empty list when no plan is current."
    )]
    async fn get_next_tasks(&self, Parameters(params): Parameters<PlanSelector>) -> McpResult {
        self.handlers().get_next_tasks(params).await
    }

    #[tool(
        name = "update_task_status",
        description = "Update the status of a task. Status must be one of: Pending, Working, Pending For Review, Complete, Need Fixed. Set Working when starting a task, Pending For Review when it awaits review, Complete only when it is truly finished, and Need Fixed when problems were found."
    )]
    async fn update_task_status(&self, Parameters(params): Parameters<UpdateTaskStatus>) -> McpResult {
        self.handlers().update_task_status(params).await
    }

    #[tool(
        name = "add_comment",
        description = "Add a comment to a task. Type is one of Note (default), Question, Suggestion, Issue or Other. Use comments to record questions, problems and decisions next to the work they concern."
    )]
    async fn add_comment(&self, Parameters(params): Parameters<AddComment>) -> McpResult {
        self.handlers().add_comment(params).await
    }

    #[tool(
        name = "remove_comment",
        description = "Remove a comment from a task, for example once the action item it describes is done or it became outdated."
    )]
    async fn remove_comment(&self, Parameters(params): Parameters<RemoveComment>) -> McpResult {
        self.handlers().remove_comment(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaypointMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "waypoint".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WaypointMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Waypoint MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

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
