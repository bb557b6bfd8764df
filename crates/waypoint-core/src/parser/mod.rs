//! Conversion of free-form plan text into structured plans.
//!
//! [`PlanParser`] chains two [`ParseStrategy`] implementations: the
//! [`ModelParser`] when a language model is configured, then the
//! [`HeuristicExtractor`]. Whatever record wins is normalized and assembled
//! into a domain [`Plan`]. Parsing is total: when every strategy fails the
//! caller still receives a plan, empty and annotated with a note.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::{models::TaskStatus, parser::PlanParser};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let plan = PlanParser::heuristic_only()
//!     .parse_text_to_plan(
//!         "1. Design API\nStatus: done\n2. Build backend\ndepends: 1",
//!         Some("API"),
//!     )
//!     .await;
//!
//! assert_eq!(plan.name, "API");
//! assert_eq!(plan.tasks[0].status, TaskStatus::Complete);
//! assert_eq!(plan.tasks[1].dependencies, vec!["Design API"]);
//! # }
//! ```

pub mod heuristic;
pub mod json;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod record;

use async_trait::async_trait;
use log::{error, info, warn};

pub use heuristic::HeuristicExtractor;
pub use model::{LlmClient, LlmError, ModelParser, RetryPolicy};
pub use normalize::normalize_status;
pub use record::{ParsedPlanRecord, ParsedTaskRecord};

use crate::{
    error::ParseError,
    models::{Comment, CommentType, Plan, Task},
};

/// Plan name used when neither the text nor the caller provides one.
pub const UNTITLED_PLAN: &str = "Untitled Plan";

/// Plan name used for the degraded result when no caller name is given.
pub const UNPARSED_PLAN: &str = "Unparsed Plan";

/// Note attached to a degraded plan.
pub const UNPARSED_NOTE: &str =
    "The text could not be parsed. Create the plan manually or provide a clearer description.";

/// A way of turning plan text into a [`ParsedPlanRecord`].
#[async_trait]
pub trait ParseStrategy: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    async fn parse(&self, text: &str, name: Option<&str>) -> Result<ParsedPlanRecord, ParseError>;
}

/// Parse orchestrator: model first, heuristic fallback, degraded plan last.
pub struct PlanParser {
    strategies: Vec<Box<dyn ParseStrategy>>,
    has_model: bool,
}

impl PlanParser {
    /// Chains `model` (when it has a client) and the heuristic extractor.
    pub fn new(model: ModelParser) -> Self {
        let has_model = model.is_available();
        let mut strategies: Vec<Box<dyn ParseStrategy>> = Vec::with_capacity(2);
        if has_model {
            strategies.push(Box::new(model));
        }
        strategies.push(Box::new(HeuristicExtractor::new()));
        Self {
            strategies,
            has_model,
        }
    }

    /// Parser that never contacts a language model.
    pub fn heuristic_only() -> Self {
        Self::new(ModelParser::new(None, crate::config::DEFAULT_MODEL))
    }

    /// Custom strategy chain, tried in order.
    pub fn from_strategies(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self {
            strategies,
            has_model: false,
        }
    }

    pub fn has_model(&self) -> bool {
        self.has_model
    }

    /// Converts plan text into a new plan. Never fails.
    pub async fn parse_text_to_plan(&self, text: &str, name: Option<&str>) -> Plan {
        let name = name.map(str::trim).filter(|name| !name.is_empty());
        if !self.has_model {
            info!("No language model configured, using heuristic extraction");
        }

        let mut last_error = None;
        for strategy in &self.strategies {
            match strategy.parse(text, name).await {
                Ok(record) => {
                    info!(
                        "Parsed plan text with the {} strategy ({} tasks)",
                        strategy.name(),
                        record.tasks.len()
                    );
                    return assemble(record, name);
                }
                Err(err) => {
                    warn!("The {} strategy failed: {err}", strategy.name());
                    last_error = Some(err);
                }
            }
        }

        let reason = last_error.map_or_else(|| "no strategy available".to_string(), |err| err.to_string());
        error!("Plan text could not be parsed: {reason}");
        degraded_plan(name, &reason)
    }
}

/// Folds a parsed record into a fresh domain plan.
pub fn assemble(record: ParsedPlanRecord, name: Option<&str>) -> Plan {
    let plan_name = Some(record.name.trim())
        .filter(|record_name| !record_name.is_empty())
        .or(name)
        .unwrap_or(UNTITLED_PLAN);

    let mut plan = Plan::new(plan_name);
    plan.description = Some(record.description.trim().to_string()).filter(|text| !text.is_empty());
    plan.notes = record.notes;
    plan.tasks = record.tasks.into_iter().map(assemble_task).collect();
    plan
}

fn assemble_task(record: ParsedTaskRecord) -> Task {
    let mut task = Task::new(record.title);
    task.description = Some(record.description.trim().to_string()).filter(|text| !text.is_empty());
    task.status = normalize_status(&record.status);
    task.order = record.order.and_then(|order| u32::try_from(order).ok());
    task.dependencies = record.dependencies;
    task.comments = record
        .comments
        .into_iter()
        .map(|content| Comment::new(content, CommentType::Suggestion))
        .collect();
    task
}

fn degraded_plan(name: Option<&str>, reason: &str) -> Plan {
    let mut plan = Plan::new(name.unwrap_or(UNPARSED_PLAN));
    plan.description = Some(format!("Unable to parse the text into a structured plan: {reason}"));
    plan.notes = vec![UNPARSED_NOTE.to_string()];
    plan
}
