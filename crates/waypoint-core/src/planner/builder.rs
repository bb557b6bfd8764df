//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, info};
use tokio::task;

use super::Planner;
use crate::{
    config::ModelConfig,
    error::{PlannerError, Result},
    parser::{
        model::{Delay, LlmClient},
        ModelParser, PlanParser, RetryPolicy,
    },
    store::PlanStore,
};

/// Builder for creating and configuring Planner instances.
#[derive(Clone, Default)]
pub struct PlannerBuilder {
    data_dir: Option<PathBuf>,
    model_config: ModelConfig,
    llm_client: Option<Arc<dyn LlmClient>>,
    retry_policy: Option<RetryPolicy>,
    delay: Option<Arc<dyn Delay>>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory holding `plans.json` and `current_plan.json`.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint` or `~/.local/share/waypoint`
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the language model endpoint used to parse plan text.
    pub fn with_model_config(mut self, config: ModelConfig) -> Self {
        self.model_config = config;
        self
    }

    /// Uses `client` for model-backed parsing instead of building an HTTP
    /// client from the model configuration.
    pub fn with_llm_client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Replaces the wait between transport retries.
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::XdgDirectory` if no default data directory can
    /// be determined
    /// Returns `PlannerError::FileSystem` if the data directory cannot be
    /// created
    /// Returns `PlannerError::Configuration` if the model client cannot be
    /// built
    pub async fn build(self) -> Result<Planner> {
        let data_dir = match self.data_dir {
            Some(path) => path,
            None => Self::default_data_dir()?,
        };
        debug!("Opening plan store at {}", data_dir.display());

        let store = task::spawn_blocking(move || PlanStore::new(data_dir))
            .await
            .map_err(PlannerError::join)??;

        let mut model = match self.llm_client {
            Some(client) => ModelParser::new(Some(client), self.model_config.model.clone()),
            None => ModelParser::from_config(&self.model_config).map_err(|e| {
                PlannerError::Configuration {
                    message: format!("Failed to build language model client: {e}"),
                }
            })?,
        };
        if let Some(policy) = self.retry_policy {
            model = model.with_retry_policy(policy);
        }
        if let Some(delay) = self.delay {
            model = model.with_delay(delay);
        }

        if model.is_available() {
            info!("Plan text will be parsed with model {}", self.model_config.model);
        }

        Ok(Planner::new(store, PlanParser::new(model)))
    }

    /// Returns the default data directory following the XDG Base Directory
    /// specification.
    fn default_data_dir() -> Result<PathBuf> {
        let plans_file = xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file(crate::store::PLANS_FILE)
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))?;
        plans_file
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| PlannerError::XdgDirectory("data directory has no parent".to_string()))
    }
}
