//! Plan records in `plans.json`.

use log::warn;
use serde_json::{Map, Value};

use super::{read_json, write_json, PlanStore};
use crate::{error::Result, models::Plan};

impl PlanStore {
    /// All plans, oldest first.
    ///
    /// Entries that fail to decode are logged and skipped.
    pub fn load_plans(&self) -> Result<Vec<Plan>> {
        let path = self.plans_path();
        let Some(entries) = read_json::<Map<String, Value>>(&path)? else {
            return Ok(Vec::new());
        };

        let mut plans: Vec<Plan> = entries
            .into_iter()
            .filter_map(|(id, entry)| match serde_json::from_value::<Plan>(entry) {
                Ok(plan) => Some(plan),
                Err(e) => {
                    warn!("Skipping unreadable plan {id} in {}: {e}", path.display());
                    None
                }
            })
            .collect();
        plans.sort_by_key(|plan| plan.created_at);
        Ok(plans)
    }

    /// Replaces the whole plan file.
    pub fn save_plans(&self, plans: &[Plan]) -> Result<()> {
        let mut entries = Map::new();
        for plan in plans {
            entries.insert(plan.id.clone(), serde_json::to_value(plan)?);
        }
        write_json(&self.plans_path(), &entries)
    }

    pub fn get_plan(&self, id: &str) -> Result<Option<Plan>> {
        Ok(self.load_plans()?.into_iter().find(|plan| plan.id == id))
    }

    /// Inserts `plan`, or replaces the stored plan with the same ID.
    pub fn put_plan(&self, plan: &Plan) -> Result<()> {
        let mut plans = self.load_plans()?;
        match plans.iter_mut().find(|stored| stored.id == plan.id) {
            Some(stored) => *stored = plan.clone(),
            None => plans.push(plan.clone()),
        }
        self.save_plans(&plans)
    }

    /// Removes a plan. Returns whether it existed.
    pub fn remove_plan(&self, id: &str) -> Result<bool> {
        let mut plans = self.load_plans()?;
        let before = plans.len();
        plans.retain(|plan| plan.id != id);
        if plans.len() == before {
            return Ok(false);
        }
        self.save_plans(&plans)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::models::Task;

    fn store() -> (TempDir, PlanStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = PlanStore::new(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_put_and_get_round_trip() {
        let (_dir, store) = store();
        let mut plan = Plan::new("Launch");
        plan.notes = vec!["be careful".into()];
        plan.tasks.push(Task::new("Ship"));

        store.put_plan(&plan).unwrap();
        assert_eq!(store.get_plan(&plan.id).unwrap(), Some(plan.clone()));

        plan.name = "Launch v2".into();
        store.put_plan(&plan).unwrap();
        let plans = store.load_plans().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "Launch v2");
    }

    #[test]
    fn test_file_is_keyed_by_id() {
        let (_dir, store) = store();
        let plan = Plan::new("Keyed");
        store.put_plan(&plan).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.plans_path()).unwrap()).unwrap();
        assert_eq!(raw[&plan.id]["name"], "Keyed");
    }

    #[test]
    fn test_remove_plan() {
        let (_dir, store) = store();
        let plan = Plan::new("Doomed");
        store.put_plan(&plan).unwrap();

        assert!(store.remove_plan(&plan.id).unwrap());
        assert!(!store.remove_plan(&plan.id).unwrap());
        assert!(store.load_plans().unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_entry_is_skipped() {
        let (_dir, store) = store();
        let plan = Plan::new("Good");
        store.put_plan(&plan).unwrap();

        let mut raw: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(store.plans_path()).unwrap()).unwrap();
        raw.insert("broken".into(), serde_json::json!({"name": 42}));
        fs::write(store.plans_path(), serde_json::to_string(&raw).unwrap()).unwrap();

        let plans = store.load_plans().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, plan.id);
    }
}
