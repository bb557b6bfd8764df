//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete operations print a one-line confirmation naming
//! the resource, followed by the resource itself where that is useful.

use std::fmt;

use crate::models::{Comment, Plan, Task};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{display::CreateResult, models::Plan};
///
/// let plan = Plan::new("New Project");
/// let output = CreateResult::new(plan.clone()).to_string();
/// assert!(output.starts_with(&format!("Created plan with ID: {}", plan.id)));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Comment> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added comment with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{display::UpdateResult, models::Task};
///
/// let task = Task::new("Updated task");
/// let changes = vec!["Changed status to Working".to_string()];
///
/// let output = UpdateResult::with_changes(task, changes).to_string();
/// assert!(output.contains("Changes made:"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted task '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Comment> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted comment with ID: {}", self.resource.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentType;

    #[test]
    fn test_create_result_task() {
        let task = Task::new("Write docs");
        let output = CreateResult::new(task.clone()).to_string();
        assert!(output.starts_with(&format!("Created task with ID: {}\n\n", task.id)));
        assert!(output.contains("### Write docs"));
    }

    #[test]
    fn test_update_result_without_changes() {
        let plan = Plan::new("Quiet");
        let output = UpdateResult::new(plan).to_string();
        assert!(!output.contains("Changes made:"));
        assert!(output.contains("# Quiet"));
    }

    #[test]
    fn test_update_result_lists_changes() {
        let task = Task::new("Deploy");
        let output = UpdateResult::with_changes(
            task,
            vec!["Updated title to 'Deploy'".to_string(), "Set order to 3".to_string()],
        )
        .to_string();
        assert!(output.contains("Changes made:\n- Updated title to 'Deploy'\n- Set order to 3\n"));
    }

    #[test]
    fn test_delete_results() {
        let plan = Plan::new("Old");
        assert_eq!(
            DeleteResult::new(plan.clone()).to_string(),
            format!("Deleted plan 'Old' (ID: {})\n", plan.id)
        );

        let comment = Comment::new("obsolete", CommentType::Other);
        assert_eq!(
            DeleteResult::new(comment.clone()).to_string(),
            format!("Deleted comment with ID: {}\n", comment.id)
        );
    }
}
