mod common;

use std::fs;

use common::open_planner;
use serde_json::{json, Value};
use tempfile::TempDir;
use waypoint_core::{
    params::{CreatePlan, PlanId, PlanSelector},
    PlanStore, TaskStatus,
};

fn write(path: &std::path::Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

#[tokio::test]
async fn test_reads_existing_data_files() {
    let temp_dir = TempDir::new().unwrap();
    write(
        &temp_dir.path().join("plans.json"),
        &json!({
            "p1": {
                "id": "p1",
                "name": "Imported",
                "description": null,
                "notes": [],
                "created_at": "2024-05-01T08:00:00Z",
                "updated_at": null,
                "tasks": [
                    {
                        "id": "t1",
                        "title": "Review draft",
                        "description": "",
                        "status": "Pending For Review",
                        "comments": [
                            {
                                "id": "c1",
                                "content": "Second pass",
                                "type": "Question",
                                "created_at": "2024-05-01T09:00:00Z",
                                "updated_at": null
                            }
                        ],
                        "order": 1,
                        "dependencies": [],
                        "created_at": "2024-05-01T08:00:00Z",
                        "updated_at": null
                    },
                    {
                        "id": "t2",
                        "title": "Fix typos",
                        "status": "Need Fixed",
                        "created_at": "2024-05-01T08:00:00Z"
                    }
                ]
            }
        }),
    );
    write(
        &temp_dir.path().join("current_plan.json"),
        &json!({"plan_id": "p1"}),
    );

    let planner = open_planner(temp_dir.path()).await;
    let plan = planner.show_plan(&PlanSelector::default()).await.unwrap();

    assert_eq!(plan.name, "Imported");
    assert_eq!(plan.tasks[0].status, TaskStatus::PendingForReview);
    assert_eq!(plan.tasks[0].comments[0].content, "Second pass");
    assert_eq!(plan.tasks[1].status, TaskStatus::NeedFixed);

    let ready = planner.next_tasks(&PlanSelector::default()).await.unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, "t2");
}

#[tokio::test]
async fn test_writes_plans_keyed_by_id() {
    let temp_dir = TempDir::new().unwrap();
    let planner = open_planner(temp_dir.path()).await;

    let plan = planner
        .create_plan(&CreatePlan {
            name: "On disk".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    planner
        .set_current_plan(&PlanId { id: plan.id.clone() })
        .await
        .unwrap();

    let plans: Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("plans.json")).unwrap())
            .unwrap();
    assert_eq!(plans[&plan.id]["name"], "On disk");
    assert_eq!(plans[&plan.id]["tasks"], json!([]));

    let current: Value = serde_json::from_str(
        &fs::read_to_string(temp_dir.path().join("current_plan.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(current, json!({"plan_id": plan.id}));

    planner.clear_current_plan().await.unwrap();
    let current: Value = serde_json::from_str(
        &fs::read_to_string(temp_dir.path().join("current_plan.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(current, json!({"plan_id": null}));
}

#[test]
fn test_unreadable_entries_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    write(
        &temp_dir.path().join("plans.json"),
        &json!({
            "good": {"id": "good", "name": "Good", "created_at": "2024-05-01T08:00:00Z"},
            "bad": {"id": "bad"}
        }),
    );

    let store = PlanStore::new(temp_dir.path()).unwrap();
    let plans = store.load_plans().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].id, "good");
}

#[test]
fn test_dangling_current_pointer_reads_as_no_plan() {
    let temp_dir = TempDir::new().unwrap();
    write(
        &temp_dir.path().join("current_plan.json"),
        &json!({"plan_id": "gone"}),
    );

    let store = PlanStore::new(temp_dir.path()).unwrap();
    assert_eq!(store.current_plan_id().unwrap().as_deref(), Some("gone"));
    assert!(store.get_plan("gone").unwrap().is_none());
}
