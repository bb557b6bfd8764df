//! Data models for plans, tasks and comments.
//!
//! This module contains the core domain models of the Waypoint tracker.
//! Display implementations for these models live in
//! [`crate::display::models`] so that presentation stays separate from the
//! data structures.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{Plan, Task, TaskStatus};
//!
//! let mut plan = Plan::new("Launch");
//! let mut task = Task::new("Write release notes");
//! task.order = Some(1);
//! plan.tasks.push(task);
//!
//! assert_eq!(plan.tasks[0].status, TaskStatus::Pending);
//! println!("{}", plan); // Formats with markdown headers and metadata
//! ```

pub mod comment;
pub mod plan;
pub mod requests;
pub mod status;
pub mod summary;
pub mod task;


// Re-export all public types at the models level
pub use comment::Comment;
pub use plan::Plan;
pub use requests::UpdateTaskRequest;
pub use status::{CommentType, TaskStatus};
pub use summary::{PlanSummary, TaskSummary};
pub use task::Task;
