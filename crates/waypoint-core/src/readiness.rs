//! Which tasks of a plan can be worked on right now.

use crate::models::{Plan, Task, TaskStatus, TaskSummary};

/// Actionable tasks of `plan`, sorted by order.
///
/// A task is actionable when its status is `Pending` or `NeedFixed` and
/// every dependency that resolves to a sibling (by id first, then by exact
/// title) is `Complete`. Dependencies matching no sibling are ignored.
/// Tasks without an order sort last; ties keep plan order.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{models::{Plan, Task, TaskStatus}, readiness::next_actionable};
///
/// let mut plan = Plan::new("Launch");
/// let mut design = Task::new("Design");
/// design.status = TaskStatus::Working;
/// let mut build = Task::new("Build");
/// build.dependencies = vec!["Design".into()];
/// plan.tasks = vec![design, build];
///
/// assert!(next_actionable(&plan).is_empty());
///
/// plan.tasks[0].status = TaskStatus::Complete;
/// assert_eq!(next_actionable(&plan)[0].title, "Build");
/// ```
pub fn next_actionable(plan: &Plan) -> Vec<TaskSummary> {
    let mut ready: Vec<TaskSummary> = plan
        .tasks
        .iter()
        .filter(|task| task.status.is_workable())
        .filter(|task| dependencies_met(task, &plan.tasks))
        .map(TaskSummary::from)
        .collect();

    // sort_by_key is stable
    ready.sort_by_key(TaskSummary::sort_key);
    ready
}

fn dependencies_met(task: &Task, siblings: &[Task]) -> bool {
    task.dependencies
        .iter()
        .filter_map(|dependency| resolve(dependency, siblings))
        .all(|sibling| sibling.status == TaskStatus::Complete)
}

fn resolve<'a>(dependency: &str, siblings: &'a [Task]) -> Option<&'a Task> {
    siblings
        .iter()
        .find(|sibling| sibling.id == dependency)
        .or_else(|| siblings.iter().find(|sibling| sibling.title == dependency))
}
