//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Task;

/// Represents a complete plan with its notes and tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: String,

    /// Name of the plan
    pub name: String,

    /// Overall objective or summary of the plan
    #[serde(default)]
    pub description: Option<String>,

    /// Advisory notes that are not actionable tasks
    #[serde(default)]
    pub notes: Vec<String>,

    /// Tasks in the plan, in insertion order
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Plan {
    /// Creates an empty plan with a freshly minted identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            notes: Vec::new(),
            tasks: Vec::new(),
            created_at: Timestamp::now(),
            updated_at: None,
        }
    }

    /// Looks a task up by identifier.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Mutable variant of [`Plan::task`].
    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    /// Records a modification.
    pub fn touch(&mut self) {
        self.updated_at = Some(Timestamp::now());
    }
}
