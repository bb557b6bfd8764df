//! Plan operations for the Planner.

use log::{debug, info};

use super::Planner;
use crate::{
    display::PlanSummaries,
    error::{PlannerError, Result},
    models::{Plan, PlanSummary},
    params::{CreatePlan, DeletePlan, PlanId, PlanSelector, TextToPlan, UpdatePlan},
};

impl Planner {
    /// Lists all plans, oldest first.
    pub async fn list_plans(&self) -> Result<Vec<Plan>> {
        self.with_store(|store| store.load_plans()).await
    }

    /// Lists all plans as summaries with task counts and the current-plan
    /// marker.
    pub async fn list_plans_summary(&self) -> Result<PlanSummaries> {
        let (plans, current_id) = self
            .with_store(|store| Ok((store.load_plans()?, store.current_plan_id()?)))
            .await?;

        Ok(PlanSummaries(
            plans
                .iter()
                .map(|plan| PlanSummary::from_plan(plan, current_id.as_deref()))
                .collect(),
        ))
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &PlanId) -> Result<Option<Plan>> {
        let id = params.id.clone();
        self.with_store(move |store| store.get_plan(&id)).await
    }

    /// Retrieves the addressed plan, defaulting to the current one.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NoCurrentPlan` if no plan ID is given and none
    /// is current
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist
    pub async fn show_plan(&self, params: &PlanSelector) -> Result<Plan> {
        let plan_id = params.plan_id.clone();
        self.with_store(move |store| Self::load_plan(store, plan_id.as_deref()))
            .await
    }

    /// Creates a new, empty plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the name is blank
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("Plan name cannot be empty"));
        }

        let mut plan = Plan::new(name);
        plan.description = params
            .description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_string);
        plan.notes = params.notes.clone();

        self.save_new_plan(plan, false).await
    }

    /// Parses free-form text into a new plan, stores it and makes it the
    /// current plan.
    ///
    /// Parsing itself never fails; text that cannot be understood produces a
    /// plan without tasks and with an explanatory note.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the text is blank
    pub async fn create_plan_from_text(&self, params: &TextToPlan) -> Result<Plan> {
        if params.text.trim().is_empty() {
            return Err(PlannerError::invalid_input("text").with_reason("Plan text cannot be empty"));
        }

        let plan = self
            .parser
            .parse_text_to_plan(&params.text, params.name.as_deref())
            .await;
        info!(
            "Parsed plan '{}' with {} tasks from text",
            plan.name,
            plan.tasks.len()
        );

        self.save_new_plan(plan, true).await
    }

    async fn save_new_plan(&self, plan: Plan, make_current: bool) -> Result<Plan> {
        self.with_store_locked(move |store| {
            store.put_plan(&plan)?;
            if make_current {
                store.set_current_plan_id(Some(&plan.id))?;
            }
            Ok(plan)
        })
        .await
    }

    /// Updates plan metadata. Fields left as `None` are unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the new name is blank
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<Plan> {
        if let Some(name) = &params.name {
            if name.trim().is_empty() {
                return Err(
                    PlannerError::invalid_input("name").with_reason("Plan name cannot be empty")
                );
            }
        }

        let params = params.clone();
        self.modify_plan(Some(params.id.clone()), move |plan| {
            if let Some(name) = params.name {
                plan.name = name.trim().to_string();
            }
            if let Some(description) = params.description {
                plan.description = Some(description).filter(|text| !text.trim().is_empty());
            }
            if let Some(notes) = params.notes {
                plan.notes = notes;
            }
            Ok(plan.clone())
        })
        .await
    }

    /// Permanently deletes a plan and clears the current-plan pointer if it
    /// referenced it.
    ///
    /// # Returns
    ///
    /// The deleted plan, or `None` if it did not exist
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `confirmed` is false
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<Plan>> {
        if !params.confirmed {
            return Err(PlannerError::invalid_input("confirmed").with_reason(
                "Plan deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let id = params.id.clone();
        self.with_store_locked(move |store| {
            let Some(plan) = store.get_plan(&id)? else {
                return Ok(None);
            };
            store.remove_plan(&id)?;
            if store.current_plan_id()?.as_deref() == Some(id.as_str()) {
                debug!("Deleted plan {id} was current, clearing pointer");
                store.set_current_plan_id(None)?;
            }
            Ok(Some(plan))
        })
        .await
    }

    /// The current plan, if one is selected and still exists.
    pub async fn get_current_plan(&self) -> Result<Option<Plan>> {
        self.with_store(|store| match store.current_plan_id()? {
            Some(id) => store.get_plan(&id),
            None => Ok(None),
        })
        .await
    }

    /// Makes the given plan the current one.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist
    pub async fn set_current_plan(&self, params: &PlanId) -> Result<Plan> {
        let id = params.id.clone();
        self.with_store_locked(move |store| {
            let plan = store
                .get_plan(&id)?
                .ok_or_else(|| PlannerError::PlanNotFound { id: id.clone() })?;
            store.set_current_plan_id(Some(&plan.id))?;
            Ok(plan)
        })
        .await
    }

    /// Clears the current-plan pointer.
    pub async fn clear_current_plan(&self) -> Result<()> {
        self.with_store_locked(|store| store.set_current_plan_id(None))
            .await
    }
}
