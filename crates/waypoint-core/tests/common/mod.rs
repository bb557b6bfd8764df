use std::path::Path;

use waypoint_core::{Planner, PlannerBuilder};

/// Helper building a planner without a language model over `data_dir`
pub async fn open_planner(data_dir: &Path) -> Planner {
    PlannerBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .await
        .expect("Failed to create planner")
}
