//! Status and type enumerations for tasks and comments.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical lifecycle status of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Pending,

    /// Someone is working on it
    Working,

    /// Work is done and waits for a review
    #[serde(rename = "Pending For Review", alias = "PendingForReview")]
    PendingForReview,

    /// Finished
    Complete,

    /// Review found problems that must be fixed
    #[serde(rename = "Need Fixed", alias = "NeedFixed")]
    NeedFixed,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Pending,
        TaskStatus::Working,
        TaskStatus::PendingForReview,
        TaskStatus::Complete,
        TaskStatus::NeedFixed,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Working => "Working",
            TaskStatus::PendingForReview => "Pending For Review",
            TaskStatus::Complete => "Complete",
            TaskStatus::NeedFixed => "Need Fixed",
        }
    }

    /// Variant identifier, e.g. `PendingForReview`.
    pub fn variant_name(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Working => "Working",
            TaskStatus::PendingForReview => "PendingForReview",
            TaskStatus::Complete => "Complete",
            TaskStatus::NeedFixed => "NeedFixed",
        }
    }

    /// Whether a task in this status can be picked up for work.
    pub fn is_workable(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::NeedFixed)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Complete.with_icon(), "✓ Complete");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "○ Pending",
            TaskStatus::Working => "➤ Working",
            TaskStatus::PendingForReview => "◎ Pending For Review",
            TaskStatus::Complete => "✓ Complete",
            TaskStatus::NeedFixed => "✗ Need Fixed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    /// Strict parse for user input. Separators and case are ignored, so
    /// `"pending for review"`, `"PendingForReview"` and `"need_fixed"` are
    /// all accepted; anything else is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "working" => Ok(TaskStatus::Working),
            "pendingforreview" => Ok(TaskStatus::PendingForReview),
            "complete" => Ok(TaskStatus::Complete),
            "needfixed" => Ok(TaskStatus::NeedFixed),
            _ => Err(format!(
                "Invalid task status: {s} (expected one of: Pending, Working, Pending For Review, Complete, Need Fixed)"
            )),
        }
    }
}

/// Kind of a comment attached to a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum CommentType {
    #[default]
    Note,
    Question,
    Suggestion,
    Issue,
    Other,
}

impl CommentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentType::Note => "Note",
            CommentType::Question => "Question",
            CommentType::Suggestion => "Suggestion",
            CommentType::Issue => "Issue",
            CommentType::Other => "Other",
        }
    }
}

impl FromStr for CommentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "note" => Ok(CommentType::Note),
            "question" => Ok(CommentType::Question),
            "suggestion" => Ok(CommentType::Suggestion),
            "issue" => Ok(CommentType::Issue),
            "other" => Ok(CommentType::Other),
            _ => Err(format!("Invalid comment type: {s}")),
        }
    }
}
