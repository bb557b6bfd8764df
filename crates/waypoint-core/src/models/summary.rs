//! Summary projections of plans and tasks.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, Task, TaskStatus};

/// Summary information about a plan with task statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: String,
    /// Name of the plan
    pub name: String,
    /// Overall description of the plan
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Total number of tasks
    pub total_tasks: u32,
    /// Number of completed tasks
    pub completed_tasks: u32,
    /// Whether this is the currently tracked plan
    pub is_current: bool,
}

impl PlanSummary {
    /// Builds a summary, flagging it when `current_id` names this plan.
    pub fn from_plan(plan: &Plan, current_id: Option<&str>) -> Self {
        let total_tasks = plan.tasks.len() as u32;
        let completed_tasks = plan
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Complete)
            .count() as u32;

        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            description: plan.description.clone(),
            created_at: plan.created_at,
            total_tasks,
            completed_tasks,
            is_current: current_id == Some(plan.id.as_str()),
        }
    }
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self::from_plan(plan, None)
    }
}

/// Compact projection of a task, as returned by readiness queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    /// Description, or empty when the task has none
    pub description: String,
    pub status: TaskStatus,
    /// Order value; `None` sorts after every real order
    pub order: Option<u32>,
    pub dependencies: Vec<String>,
}

impl TaskSummary {
    /// Whether the task carried an explicit order.
    pub fn has_order(&self) -> bool {
        self.order.is_some()
    }

    /// Sort key placing unordered tasks last.
    pub fn sort_key(&self) -> (bool, u32) {
        (self.order.is_none(), self.order.unwrap_or_default())
    }
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            order: task.order,
            dependencies: task.dependencies.clone(),
        }
    }
}
