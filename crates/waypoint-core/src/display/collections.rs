//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with the item's own Display impl and prints
//! a fixed message when the collection is empty.

use std::{fmt, ops::Index};

use serde::Serialize;

use crate::models::{Comment, PlanSummary, Task, TaskSummary};

/// Implements the slice-like accessors shared by every collection wrapper.
macro_rules! collection_accessors {
    ($wrapper:ident, $item:ty) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Get the number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the item at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Get an iterator over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// Newtype wrapper for displaying collections of plan summaries.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{
///     display::PlanSummaries,
///     models::{Plan, PlanSummary},
/// };
///
/// let plan = Plan::new("My Project");
/// let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);
/// assert!(summaries.to_string().contains("My Project"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummaries(pub Vec<PlanSummary>);

collection_accessors!(PlanSummaries, PlanSummary);

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the tasks of a plan.
#[derive(Debug, Clone, Serialize)]
pub struct Tasks(pub Vec<Task>);

collection_accessors!(Tasks, Task);

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

/// Tasks that can be picked up now, already in readiness order.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{
///     display::ActionableTasks,
///     models::{Task, TaskSummary},
/// };
///
/// let ready = ActionableTasks(vec![TaskSummary::from(&Task::new("Design"))]);
/// assert_eq!(ready.len(), 1);
/// assert!(ready.to_string().contains("Design"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ActionableTasks(pub Vec<TaskSummary>);

collection_accessors!(ActionableTasks, TaskSummary);

impl fmt::Display for ActionableTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No actionable tasks.");
        }
        for task in &self.0 {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the comments of a task.
#[derive(Debug, Clone, Serialize)]
pub struct Comments(pub Vec<Comment>);

collection_accessors!(Comments, Comment);

impl fmt::Display for Comments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No comments found.");
        }
        for comment in &self.0 {
            write!(f, "{comment}")?;
        }
        Ok(())
    }
}
