//! Request types for updating models.

use super::TaskStatus;

/// Validated set of changes to apply to a task.
#[derive(Debug, Default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub order: Option<u32>,
    pub dependencies: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Whether the request would change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.order.is_none()
            && self.dependencies.is_none()
    }

    /// Human-readable list of the fields this request touches.
    pub fn describe_changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(format!("Updated title to '{title}'"));
        }
        if self.description.is_some() {
            changes.push("Updated description".to_string());
        }
        if let Some(status) = self.status {
            changes.push(format!("Changed status to {status}"));
        }
        if let Some(order) = self.order {
            changes.push(format!("Set order to {order}"));
        }
        if self.dependencies.is_some() {
            changes.push("Replaced dependencies".to_string());
        }
        changes
    }
}

impl TryFrom<crate::params::UpdateTask> for UpdateTaskRequest {
    type Error = crate::PlannerError;

    /// Convert an UpdateTask parameter into a validated UpdateTaskRequest.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the status string is not one of
    ///   the five canonical statuses
    /// * `PlannerError::InvalidInput` - When the title is blank
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::{models::{TaskStatus, UpdateTaskRequest}, params::UpdateTask};
    ///
    /// let params = UpdateTask {
    ///     task_id: "t1".to_string(),
    ///     status: Some("need fixed".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let request: UpdateTaskRequest = params.try_into()?;
    /// assert_eq!(request.status, Some(TaskStatus::NeedFixed));
    /// # Ok::<(), waypoint_core::PlannerError>(())
    /// ```
    fn try_from(params: crate::params::UpdateTask) -> Result<Self, Self::Error> {
        let status = params.validate()?;

        Ok(Self {
            title: params.title,
            description: params.description,
            status,
            order: params.order,
            dependencies: params.dependencies,
        })
    }
}
