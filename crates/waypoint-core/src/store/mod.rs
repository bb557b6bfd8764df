//! Flat-file JSON persistence for plans.
//!
//! The store keeps two files in its data directory:
//!
//! * `plans.json`: a JSON object mapping plan IDs to plans,
//! * `current_plan.json`: `{"plan_id": "<id>"}` or `{"plan_id": null}`.
//!
//! Missing or empty files read as empty. Every write goes to a sibling
//! temporary file that is then renamed over the target, so a crash never
//! leaves a half-written file behind. The store itself is synchronous and
//! does no locking; callers serialize read-modify-write sequences.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{PlannerError, Result};

pub mod current;
pub mod plans;

/// Name of the file holding every plan.
pub const PLANS_FILE: &str = "plans.json";

/// Name of the file holding the current-plan pointer.
pub const CURRENT_PLAN_FILE: &str = "current_plan.json";

/// JSON file store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct PlanStore {
    data_dir: PathBuf,
}

impl PlanStore {
    /// Opens a store, creating the data directory if needed.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| PlannerError::file_system(&data_dir, e))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn plans_path(&self) -> PathBuf {
        self.data_dir.join(PLANS_FILE)
    }

    pub fn current_plan_path(&self) -> PathBuf {
        self.data_dir.join(CURRENT_PLAN_FILE)
    }
}

/// Reads a JSON document, returning `None` for a missing or blank file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PlannerError::file_system(path, e)),
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&content)?))
}

/// Writes a JSON document through a temporary file and an atomic rename.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PlannerError::file_system(parent, e))?;
    }

    let content = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content).map_err(|e| PlannerError::file_system(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| PlannerError::file_system(path, e))
}
