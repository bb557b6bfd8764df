//! Comment operations for the Planner.

use super::{task_ops::task_mut, Planner};
use crate::{
    display::Comments,
    error::{PlannerError, Result},
    models::Comment,
    params::{AddComment, RemoveComment, TaskRef},
};

impl Planner {
    /// Attaches a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the content is blank
    /// Returns `PlannerError::TaskNotFound` if the plan has no such task
    pub async fn add_comment(&self, params: &AddComment) -> Result<Comment> {
        let content = params.content.trim();
        if content.is_empty() {
            return Err(
                PlannerError::invalid_input("content").with_reason("Comment content cannot be empty")
            );
        }

        let comment = Comment::new(content, params.comment_type);
        let task_id = params.task_id.clone();

        self.modify_plan(params.plan_id.clone(), move |plan| {
            let task = task_mut(plan, &task_id)?;
            task.comments.push(comment.clone());
            task.touch();
            Ok(comment)
        })
        .await
    }

    /// Lists the comments of a task, oldest first.
    pub async fn list_comments(&self, params: &TaskRef) -> Result<Comments> {
        let task = self.get_task(params).await?;
        Ok(Comments(task.comments))
    }

    /// Removes a comment from a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::CommentNotFound` if the task has no such
    /// comment
    pub async fn delete_comment(&self, params: &RemoveComment) -> Result<Comment> {
        let task_id = params.task_id.clone();
        let comment_id = params.comment_id.clone();

        self.modify_plan(params.plan_id.clone(), move |plan| {
            let task = task_mut(plan, &task_id)?;
            let index = task
                .comments
                .iter()
                .position(|comment| comment.id == comment_id)
                .ok_or_else(|| PlannerError::CommentNotFound {
                    id: comment_id.clone(),
                })?;
            let comment = task.comments.remove(index);
            task.touch();
            Ok(comment)
        })
        .await
    }
}
