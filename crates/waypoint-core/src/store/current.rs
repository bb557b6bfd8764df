//! The current-plan pointer in `current_plan.json`.

use serde::{Deserialize, Serialize};

use super::{read_json, write_json, PlanStore};
use crate::error::Result;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CurrentPlan {
    #[serde(default)]
    plan_id: Option<String>,
}

impl PlanStore {
    pub fn current_plan_id(&self) -> Result<Option<String>> {
        Ok(read_json::<CurrentPlan>(&self.current_plan_path())?.and_then(|current| current.plan_id))
    }

    /// Points the current plan at `plan_id`, or clears it with `None`.
    pub fn set_current_plan_id(&self, plan_id: Option<&str>) -> Result<()> {
        let current = CurrentPlan {
            plan_id: plan_id.map(str::to_string),
        };
        write_json(&self.current_plan_path(), &current)
    }
}
