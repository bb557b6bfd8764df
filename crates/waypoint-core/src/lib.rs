//! Core library for the Waypoint plan tracker.
//!
//! This crate turns free-form project descriptions into structured plans,
//! stores them as JSON files and answers which tasks are ready to be worked
//! on.
//!
//! - [`parser`]: Language model parsing with a rule-based fallback
//! - [`readiness`]: The next-actionable-tasks query
//! - [`store`]: JSON persistence and the current-plan pointer
//! - [`planner`]: The [`Planner`] facade used by the CLI and MCP server
//! - [`display`]: Markdown formatting for models and results
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{params::TextToPlan, PlannerBuilder};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let dir = tempfile::tempdir()?;
//! // Without a model API key the rule-based extractor does the parsing
//! let planner = PlannerBuilder::new()
//!     .with_data_dir(dir.path())
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan_from_text(&TextToPlan {
//!         text: "1. Design API\n2. Build backend\ndepends: 1".to_string(),
//!         name: Some("API".to_string()),
//!     })
//!     .await?;
//! assert_eq!(plan.tasks.len(), 2);
//!
//! // The parsed plan became current, so no plan ID is needed here
//! let ready = planner.next_tasks(&Default::default()).await?;
//! assert_eq!(ready.len(), 1);
//! assert_eq!(ready[0].title, "Design API");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod parser;
pub mod planner;
pub mod readiness;
pub mod store;

// Re-export commonly used types
pub use config::ModelConfig;
pub use display::{
    ActionableTasks, Comments, CreateResult, DeleteResult, OperationStatus, PlanSummaries, Tasks,
    UpdateResult,
};
pub use error::{ParseError, PlannerError, Result};
pub use models::{
    Comment, CommentType, Plan, PlanSummary, Task, TaskStatus, TaskSummary, UpdateTaskRequest,
};
pub use params::{
    AddComment, CreatePlan, CreateTask, DeletePlan, PlanId, PlanSelector, RemoveComment, TaskRef,
    TextToPlan, UpdatePlan, UpdateTask, UpdateTaskStatus,
};
pub use parser::PlanParser;
pub use planner::{Planner, PlannerBuilder};
pub use readiness::next_actionable;
pub use store::PlanStore;
