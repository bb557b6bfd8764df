//! Comment model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CommentType;

/// A free-text annotation on a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Unique identifier for the comment
    pub id: String,

    /// Comment body
    pub content: String,

    /// Kind of comment
    #[serde(rename = "type", default)]
    pub comment_type: CommentType,

    /// Timestamp when the comment was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the comment was last updated (UTC)
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Comment {
    pub fn new(content: impl Into<String>, comment_type: CommentType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            comment_type,
            created_at: Timestamp::now(),
            updated_at: None,
        }
    }
}
