//! Task model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, TaskStatus};

/// Represents an individual unit of work within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Brief title of the task
    pub title: String,

    /// Detailed description of the task
    #[serde(default)]
    pub description: Option<String>,

    /// Current status of the task
    #[serde(default)]
    pub status: TaskStatus,

    /// Comments attached to the task
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Logical sequence position; `None` sorts last
    #[serde(default)]
    pub order: Option<u32>,

    /// Sibling task IDs or titles this task waits for
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Task {
    /// Creates a pending task with a freshly minted identifier.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            comments: Vec::new(),
            order: None,
            dependencies: Vec::new(),
            created_at: Timestamp::now(),
            updated_at: None,
        }
    }

    /// Records a modification.
    pub fn touch(&mut self) {
        self.updated_at = Some(Timestamp::now());
    }
}
