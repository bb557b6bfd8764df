//! Display implementations for domain models.
//!
//! Every model renders as markdown so the same text works in the terminal
//! renderer and in MCP tool results.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Comment, CommentType, Plan, PlanSummary, Task, TaskStatus, TaskSummary};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for CommentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if let Some(updated) = &self.updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.notes.is_empty() {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            for note in &self.notes {
                writeln!(f, "- {note}")?;
            }
        }

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this plan.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            Some(order) => writeln!(f, "### {order}. {} ({})", self.title, self.status.with_icon())?,
            None => writeln!(f, "### {} ({})", self.title, self.status.with_icon())?,
        }
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        if !self.dependencies.is_empty() {
            writeln!(f, "- Depends on: {}", self.dependencies.join(", "))?;
        }
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if !self.comments.is_empty() {
            writeln!(f, "#### Comments")?;
            writeln!(f)?;
            for comment in &self.comments {
                write!(f, "{comment}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}** {} ({}, ID: {})",
            self.comment_type,
            self.content,
            LocalDateTime(&self.created_at),
            self.id
        )
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(" ({}/{})", self.completed_tasks, self.total_tasks)
        } else {
            String::new()
        };
        let marker = if self.is_current { " [current]" } else { "" };

        writeln!(f, "## {}{marker}{progress}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }

        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for TaskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            Some(order) => write!(f, "- **{order}. {}**", self.title)?,
            None => write!(f, "- **{}**", self.title)?,
        }
        writeln!(f, " ({}, ID: {})", self.status.with_icon(), self.id)?;

        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        if !self.dependencies.is_empty() {
            writeln!(f, "  Depends on: {}", self.dependencies.join(", "))?;
        }

        Ok(())
    }
}
