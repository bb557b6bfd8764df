//! High-level planner API for managing plans, tasks and comments.
//!
//! [`Planner`] is the facade every interface (CLI, MCP) talks to. It owns the
//! [`PlanStore`] and the [`PlanParser`] and implements the tracker's
//! operations on top of them.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Operations    │    │   Plan store    │    │   JSON files    │
//! │ (plan_ops,      │───▶│   (store/)      │───▶│ plans.json      │
//! │  task_ops, ...) │    │                 │    │ current_plan.json│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Planner`] instances
//! - [`plan_ops`]: Plan CRUD, text parsing and the current-plan pointer
//! - [`task_ops`]: Task CRUD, status changes and readiness
//! - [`comment_ops`]: Comments attached to tasks
//!
//! Blocking file I/O runs on tokio's blocking pool. Every read-modify-write
//! sequence holds an internal async mutex, so concurrent calls on one
//! planner never lose each other's updates.
//!
//! Task, comment and readiness operations take an optional plan ID. Without
//! one they act on the current plan and fail with
//! [`PlannerError::NoCurrentPlan`] when none is selected.
//!
//! # Examples
//!
//! ```rust,no_run
//! use waypoint_core::{params::{CreatePlan, CreateTask, PlanSelector}, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new().with_data_dir("/tmp/waypoint").build().await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         name: "Launch".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! planner
//!     .create_task(&CreateTask {
//!         plan_id: Some(plan.id.clone()),
//!         title: "Write release notes".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let ready = planner
//!     .next_tasks(&PlanSelector { plan_id: Some(plan.id) })
//!     .await?;
//! assert_eq!(ready.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::{sync::Mutex, task};

use crate::{
    error::{PlannerError, Result},
    models::Plan,
    parser::PlanParser,
    store::PlanStore,
};

pub mod builder;
pub mod comment_ops;
pub mod plan_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface.
pub struct Planner {
    pub(crate) store: PlanStore,
    pub(crate) parser: Arc<PlanParser>,
    write_lock: Mutex<()>,
}

impl Planner {
    pub(crate) fn new(store: PlanStore, parser: PlanParser) -> Self {
        Self {
            store,
            parser: Arc::new(parser),
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    /// Whether plan text is parsed by a language model before the heuristic
    /// fallback.
    pub fn has_model(&self) -> bool {
        self.parser.has_model()
    }

    /// Runs a store operation on the blocking pool.
    pub(crate) async fn with_store<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&PlanStore) -> Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        task::spawn_blocking(move || operation(&store))
            .await
            .map_err(PlannerError::join)?
    }

    /// Like [`Self::with_store`], holding the write lock for the duration.
    pub(crate) async fn with_store_locked<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&PlanStore) -> Result<T> + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        self.with_store(operation).await
    }

    /// Resolves an optional plan ID, falling back to the current plan.
    pub(crate) fn resolve_plan_id(store: &PlanStore, plan_id: Option<&str>) -> Result<String> {
        match plan_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Ok(id.to_string()),
            None => store.current_plan_id()?.ok_or(PlannerError::NoCurrentPlan),
        }
    }

    /// Loads the addressed plan.
    pub(crate) fn load_plan(store: &PlanStore, plan_id: Option<&str>) -> Result<Plan> {
        let id = Self::resolve_plan_id(store, plan_id)?;
        let plan = store.get_plan(&id)?;
        plan.ok_or(PlannerError::PlanNotFound { id })
    }

    /// Refreshes `updated_at` on the addressed plan, applies `change` and
    /// persists the result, all under the write lock. Nothing is written when
    /// `change` fails.
    pub(crate) async fn modify_plan<T, F>(&self, plan_id: Option<String>, change: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Plan) -> Result<T> + Send + 'static,
    {
        self.with_store_locked(move |store| {
            let mut plan = Self::load_plan(store, plan_id.as_deref())?;
            plan.touch();
            let output = change(&mut plan)?;
            store.put_plan(&plan)?;
            Ok(output)
        })
        .await
    }
}
