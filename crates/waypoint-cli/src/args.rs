//! Command-line interface definitions using clap
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types with `From`, so the core stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use waypoint_core::{config::DEFAULT_MODEL, params::*, CommentType, ModelConfig, TaskStatus};

/// Waypoint plan tracker
///
/// Turns free-form project descriptions into structured plans, tracks task
/// status and comments, and tells you which tasks are ready to work on. Run
/// `waypoint serve` to expose the tracker to AI assistants over MCP.
#[derive(Parser)]
#[command(version, about, name = "waypoint")]
pub struct Args {
    /// Directory holding plans.json and current_plan.json. Defaults to
    /// $XDG_DATA_HOME/waypoint
    #[arg(long, global = true, env = "WAYPOINT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Language model used to parse plan text. Without an API key plan text is
/// parsed by the built-in rules.
#[derive(ClapArgs)]
pub struct ModelArgs {
    /// API key for an OpenAI-compatible chat completions endpoint
    #[arg(long, global = true, env = "MODEL_API_KEY", hide_env_values = true)]
    pub model_api_key: Option<String>,

    /// Model name
    #[arg(long, global = true, env = "MODEL_NAME", default_value = DEFAULT_MODEL)]
    pub model_name: String,

    /// Base URL of the endpoint, e.g. http://localhost:11434/v1
    #[arg(long, global = true, env = "MODEL_BASE_URL")]
    pub model_base_url: Option<String>,
}

impl From<ModelArgs> for ModelConfig {
    fn from(val: ModelArgs) -> Self {
        ModelConfig {
            api_key: val.model_api_key,
            model: val.model_name,
            base_url: val.model_base_url,
            ..Default::default()
        }
    }
}

/// Available commands for the Waypoint CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage tasks within a plan
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage comments on a task
    #[command(alias = "c")]
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Show the tasks that can be worked on now
    #[command(alias = "n")]
    Next(PlanArg),
    /// Start the MCP server
    Serve,
}

/// Optional plan selector shared by task-level commands
#[derive(ClapArgs)]
pub struct PlanArg {
    /// ID of the plan; defaults to the current plan
    #[arg(long = "plan", short = 'p')]
    pub plan_id: Option<String>,
}

impl From<PlanArg> for PlanSelector {
    fn from(val: PlanArg) -> Self {
        PlanSelector {
            plan_id: val.plan_id,
        }
    }
}

// ============================================================================
// Plan commands
// ============================================================================

/// Create an empty plan
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Name of the plan
    pub name: String,
    /// Overall objective of the plan
    #[arg(short, long)]
    pub description: Option<String>,
    /// Advisory note; repeat for several
    #[arg(short, long = "note")]
    pub notes: Vec<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            name: val.name,
            description: val.description,
            notes: val.notes,
        }
    }
}

/// Parse plan text into a new plan and make it current
///
/// The text comes from the positional argument, from --file, or from
/// standard input when neither is given.
#[derive(ClapArgs)]
pub struct ParsePlanArgs {
    /// Plan text
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,
    /// Read the plan text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Name of the plan; inferred from the text when omitted
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Show a plan
#[derive(ClapArgs)]
pub struct ShowPlanArgs {
    /// ID of the plan; defaults to the current plan
    pub id: Option<String>,
}

impl From<ShowPlanArgs> for PlanSelector {
    fn from(val: ShowPlanArgs) -> Self {
        PlanSelector { plan_id: val.id }
    }
}

/// Update plan details
#[derive(ClapArgs)]
pub struct UpdatePlanArgs {
    /// ID of the plan
    pub id: String,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Replacement notes; repeat for several
    #[arg(short, long = "note")]
    pub notes: Option<Vec<String>>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            name: val.name,
            description: val.description,
            notes: val.notes,
        }
    }
}

/// Select the current plan
#[derive(ClapArgs)]
pub struct UsePlanArgs {
    /// ID of the plan to track
    #[arg(required_unless_present = "clear")]
    pub id: Option<String>,
    /// Stop tracking any plan
    #[arg(long, conflicts_with = "id")]
    pub clear: bool,
}

/// Delete a plan permanently
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create an empty plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Parse plan text into a new plan and make it current
    #[command(alias = "p")]
    Parse(ParsePlanArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with its tasks
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Update plan details
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Select the current plan
    Use(UsePlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
}

// ============================================================================
// Task commands
// ============================================================================

/// Add a task to a plan
#[derive(ClapArgs)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
    #[command(flatten)]
    pub plan: PlanArg,
    /// Detailed description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Sequence position
    #[arg(short, long)]
    pub order: Option<u32>,
    /// IDs or titles of tasks this one depends on, comma-separated
    #[arg(long = "depends-on", value_delimiter = ',')]
    pub dependencies: Vec<String>,
}

impl From<AddTaskArgs> for CreateTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateTask {
            plan_id: val.plan.plan_id,
            title: val.title,
            description: val.description,
            order: val.order,
            dependencies: val.dependencies,
        }
    }
}

/// Address a single task
#[derive(ClapArgs)]
pub struct TaskArgs {
    /// ID of the task
    pub task_id: String,
    #[command(flatten)]
    pub plan: PlanArg,
}

impl From<TaskArgs> for TaskRef {
    fn from(val: TaskArgs) -> Self {
        TaskRef {
            plan_id: val.plan.plan_id,
            task_id: val.task_id,
        }
    }
}

/// Update task details
#[derive(ClapArgs)]
pub struct UpdateTaskArgs {
    /// ID of the task
    pub task_id: String,
    #[command(flatten)]
    pub plan: PlanArg,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New status (Pending, Working, "Pending For Review", Complete, "Need Fixed")
    #[arg(short, long)]
    pub status: Option<String>,
    /// New sequence position
    #[arg(short, long)]
    pub order: Option<u32>,
    /// Replacement dependencies, comma-separated
    #[arg(long = "depends-on", value_delimiter = ',')]
    pub dependencies: Option<Vec<String>>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            plan_id: val.plan.plan_id,
            task_id: val.task_id,
            title: val.title,
            description: val.description,
            status: val.status,
            order: val.order,
            dependencies: val.dependencies,
        }
    }
}

/// Change a task's status
#[derive(ClapArgs)]
pub struct TaskStatusArgs {
    /// ID of the task
    pub task_id: String,
    /// New status (Pending, Working, "Pending For Review", Complete, "Need Fixed")
    pub status: TaskStatus,
    #[command(flatten)]
    pub plan: PlanArg,
}

impl From<TaskStatusArgs> for UpdateTaskStatus {
    fn from(val: TaskStatusArgs) -> Self {
        UpdateTaskStatus {
            plan_id: val.plan.plan_id,
            task_id: val.task_id,
            status: val.status,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a plan
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List the tasks of a plan
    #[command(aliases = ["l", "ls"])]
    List(PlanArg),
    /// Show a single task
    #[command(alias = "s")]
    Show(TaskArgs),
    /// Update task details
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Change a task's status
    Status(TaskStatusArgs),
    /// Delete a task
    #[command(aliases = ["d", "rm"])]
    Delete(TaskArgs),
}

// ============================================================================
// Comment commands
// ============================================================================

/// Comment on a task
#[derive(ClapArgs)]
pub struct AddCommentArgs {
    /// ID of the task
    pub task_id: String,
    /// Comment text
    pub content: String,
    /// Kind of comment (note, question, suggestion, issue, other)
    #[arg(short = 't', long = "type", default_value = "note")]
    pub comment_type: CommentType,
    #[command(flatten)]
    pub plan: PlanArg,
}

impl From<AddCommentArgs> for AddComment {
    fn from(val: AddCommentArgs) -> Self {
        AddComment {
            plan_id: val.plan.plan_id,
            task_id: val.task_id,
            content: val.content,
            comment_type: val.comment_type,
        }
    }
}

/// Remove a comment
#[derive(ClapArgs)]
pub struct DeleteCommentArgs {
    /// ID of the task
    pub task_id: String,
    /// ID of the comment
    pub comment_id: String,
    #[command(flatten)]
    pub plan: PlanArg,
}

impl From<DeleteCommentArgs> for RemoveComment {
    fn from(val: DeleteCommentArgs) -> Self {
        RemoveComment {
            plan_id: val.plan.plan_id,
            task_id: val.task_id,
            comment_id: val.comment_id,
        }
    }
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Comment on a task
    #[command(alias = "a")]
    Add(AddCommentArgs),
    /// List the comments of a task
    #[command(aliases = ["l", "ls"])]
    List(TaskArgs),
    /// Remove a comment
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteCommentArgs),
}
