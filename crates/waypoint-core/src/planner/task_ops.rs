//! Task operations for the Planner.

use log::debug;

use super::Planner;
use crate::{
    display::{ActionableTasks, Tasks},
    error::{PlannerError, Result},
    models::{Plan, Task, UpdateTaskRequest},
    params::{CreateTask, PlanSelector, TaskRef, UpdateTask, UpdateTaskStatus},
    readiness::next_actionable,
};

/// Finds a task in `plan`, or fails with `TaskNotFound`.
pub(crate) fn task_mut<'a>(plan: &'a mut Plan, task_id: &str) -> Result<&'a mut Task> {
    plan.task_mut(task_id).ok_or_else(|| PlannerError::TaskNotFound {
        id: task_id.to_string(),
    })
}

impl Planner {
    /// Lists the tasks of a plan in stored order.
    pub async fn list_tasks(&self, params: &PlanSelector) -> Result<Tasks> {
        let plan = self.show_plan(params).await?;
        Ok(Tasks(plan.tasks))
    }

    /// Retrieves a single task.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::TaskNotFound` if the plan has no such task
    pub async fn get_task(&self, params: &TaskRef) -> Result<Task> {
        let plan = self
            .show_plan(&PlanSelector {
                plan_id: params.plan_id.clone(),
            })
            .await?;
        plan.task(&params.task_id)
            .cloned()
            .ok_or_else(|| PlannerError::TaskNotFound {
                id: params.task_id.clone(),
            })
    }

    /// Appends a new task to a plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the title is blank
    pub async fn create_task(&self, params: &CreateTask) -> Result<Task> {
        let title = params.title.trim();
        if title.is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("Task title cannot be empty"));
        }

        let mut task = Task::new(title);
        task.description = params
            .description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_string);
        task.order = params.order;
        task.dependencies = params.dependencies.clone();

        self.modify_plan(params.plan_id.clone(), move |plan| {
            plan.tasks.push(task.clone());
            Ok(task)
        })
        .await
    }

    /// Updates task details. Fields left as `None` are unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the status is not a canonical
    /// label or the title is blank
    /// Returns `PlannerError::TaskNotFound` if the plan has no such task
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Task> {
        let request = UpdateTaskRequest::try_from(params.clone())?;
        if request.is_empty() {
            debug!("Update for task {} changes nothing", params.task_id);
        }
        let task_id = params.task_id.clone();

        self.modify_plan(params.plan_id.clone(), move |plan| {
            let task = task_mut(plan, &task_id)?;
            if let Some(title) = request.title {
                task.title = title.trim().to_string();
            }
            if let Some(description) = request.description {
                task.description = Some(description).filter(|text| !text.trim().is_empty());
            }
            if let Some(status) = request.status {
                task.status = status;
            }
            if let Some(order) = request.order {
                task.order = Some(order);
            }
            if let Some(dependencies) = request.dependencies {
                task.dependencies = dependencies;
            }
            task.touch();
            Ok(task.clone())
        })
        .await
    }

    /// Changes only the status of a task.
    pub async fn update_task_status(&self, params: &UpdateTaskStatus) -> Result<Task> {
        let task_id = params.task_id.clone();
        let status = params.status;

        self.modify_plan(params.plan_id.clone(), move |plan| {
            let task = task_mut(plan, &task_id)?;
            task.status = status;
            task.touch();
            Ok(task.clone())
        })
        .await
    }

    /// Removes a task from its plan and returns it.
    pub async fn delete_task(&self, params: &TaskRef) -> Result<Task> {
        let task_id = params.task_id.clone();

        self.modify_plan(params.plan_id.clone(), move |plan| {
            let index = plan
                .tasks
                .iter()
                .position(|task| task.id == task_id)
                .ok_or_else(|| PlannerError::TaskNotFound {
                    id: task_id.clone(),
                })?;
            Ok(plan.tasks.remove(index))
        })
        .await
    }

    /// Tasks that can be worked on now, sorted by order.
    ///
    /// Without a plan ID the current plan is used; when no plan is current
    /// the result is empty rather than an error.
    pub async fn next_tasks(&self, params: &PlanSelector) -> Result<ActionableTasks> {
        let plan = match self.show_plan(params).await {
            Ok(plan) => plan,
            Err(PlannerError::NoCurrentPlan) => return Ok(ActionableTasks(Vec::new())),
            Err(e) => return Err(e),
        };
        Ok(ActionableTasks(next_actionable(&plan)))
    }
}
