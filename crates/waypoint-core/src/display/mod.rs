//! Display formatting for models and operation results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes get newtype wrappers. All output is markdown, which
//! the CLI renders with termimad and the MCP server returns verbatim.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  Wrappers &     │    │   Markdown      │
//! │  (Plan, Task)   │───▶│  Result Types   │───▶│  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: PlanSummaries, Tasks, ActionableTasks, Comments
//! - [`results`]: CreateResult, UpdateResult, DeleteResult
//! - [`status`]: OperationStatus
//! - [`datetime`]: Local time formatting
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::{
//!     display::{OperationStatus, UpdateResult},
//!     models::Plan,
//! };
//!
//! let plan = Plan::new("New Project");
//! let changes = vec!["Updated description".to_string()];
//! let output = UpdateResult::with_changes(plan, changes).to_string();
//! assert!(output.contains("Changes made:"));
//!
//! println!("{}", OperationStatus::success("Current plan cleared"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{ActionableTasks, Comments, PlanSummaries, Tasks};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
