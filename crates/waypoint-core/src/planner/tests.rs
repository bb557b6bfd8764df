//! Tests for the planner module.

use std::sync::Arc;

use tempfile::TempDir;

use super::*;
use crate::{
    models::{CommentType, TaskStatus},
    params::{
        AddComment, CreatePlan, CreateTask, DeletePlan, PlanId, PlanSelector, RemoveComment,
        TaskRef, TextToPlan, UpdatePlan, UpdateTask, UpdateTaskStatus,
    },
    parser::model::{LlmClient, LlmError, NoDelay, ScriptedLlmClient},
};

/// Helper function to create a test planner without a language model
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = PlannerBuilder::new()
        .with_data_dir(temp_dir.path())
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Helper creating a planner whose model replies come from `client`
async fn create_scripted_planner(client: Arc<ScriptedLlmClient>) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let client: Arc<dyn LlmClient> = client;
    let planner = PlannerBuilder::new()
        .with_data_dir(temp_dir.path())
        .with_llm_client(client)
        .with_delay(Arc::new(NoDelay))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

async fn create_named_plan(planner: &Planner, name: &str) -> Plan {
    planner
        .create_plan(&CreatePlan {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan")
}

async fn add_task(planner: &Planner, plan_id: &str, title: &str, order: Option<u32>) -> String {
    planner
        .create_task(&CreateTask {
            plan_id: Some(plan_id.to_string()),
            title: title.to_string(),
            order,
            ..Default::default()
        })
        .await
        .expect("Failed to create task")
        .id
}

fn selector(plan_id: &str) -> PlanSelector {
    PlanSelector {
        plan_id: Some(plan_id.to_string()),
    }
}

fn task_ref(plan_id: &str, task_id: &str) -> TaskRef {
    TaskRef {
        plan_id: Some(plan_id.to_string()),
        task_id: task_id.to_string(),
    }
}

#[tokio::test]
async fn test_create_plan_does_not_select_it() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = planner
        .create_plan(&CreatePlan {
            name: "  Launch  ".to_string(),
            description: Some("Ship it".to_string()),
            notes: vec!["Freeze first".to_string()],
        })
        .await
        .expect("Failed to create plan");

    assert_eq!(plan.name, "Launch");
    assert_eq!(plan.notes, ["Freeze first"]);
    assert!(plan.tasks.is_empty());
    assert!(planner.get_current_plan().await.unwrap().is_none());

    let stored = planner
        .get_plan(&PlanId { id: plan.id.clone() })
        .await
        .unwrap()
        .expect("plan should be stored");
    assert_eq!(stored, plan);
}

#[tokio::test]
async fn test_create_plan_rejects_blank_name() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .create_plan(&CreatePlan {
            name: "   ".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    assert!(planner.list_plans().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_plans_summary_marks_current() {
    let (_temp_dir, planner) = create_test_planner().await;
    let first = create_named_plan(&planner, "First").await;
    let second = create_named_plan(&planner, "Second").await;
    add_task(&planner, &second.id, "Only task", None).await;

    planner
        .set_current_plan(&PlanId { id: second.id.clone() })
        .await
        .expect("Failed to select plan");

    let summaries = planner.list_plans_summary().await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, first.id);
    assert!(!summaries[0].is_current);
    assert_eq!(summaries[1].id, second.id);
    assert!(summaries[1].is_current);
    assert_eq!(summaries[1].total_tasks, 1);
}

#[tokio::test]
async fn test_create_plan_from_text_heuristic() {
    let (_temp_dir, planner) = create_test_planner().await;
    assert!(!planner.has_model());

    let plan = planner
        .create_plan_from_text(&TextToPlan {
            text: "1. Design API\nStatus: done\n2. Build backend\ndepends: 1".to_string(),
            name: Some("API".to_string()),
        })
        .await
        .expect("Failed to parse plan");

    assert_eq!(plan.name, "API");
    assert_eq!(plan.tasks.len(), 2);
    assert_eq!(plan.tasks[0].status, TaskStatus::Complete);
    assert_eq!(plan.tasks[1].dependencies, ["Design API"]);

    let current = planner.get_current_plan().await.unwrap().expect("current plan");
    assert_eq!(current.id, plan.id);
}

#[tokio::test]
async fn test_create_plan_from_text_uses_model() {
    let reply = r#"{
        "name": "Model Plan",
        "description": "From the model",
        "notes": ["Mind the budget"],
        "tasks": [
            {"title": "Plan", "status": "completed", "order": 1},
            {"title": "Execute", "status": "Pending", "order": 2, "dependencies": ["Plan"]}
        ]
    }"#;
    let client = Arc::new(ScriptedLlmClient::new([Ok(reply.to_string())]));
    let (_temp_dir, planner) = create_scripted_planner(client.clone()).await;
    assert!(planner.has_model());

    let plan = planner
        .create_plan_from_text(&TextToPlan {
            text: "Plan then execute".to_string(),
            name: None,
        })
        .await
        .expect("Failed to parse plan");

    assert_eq!(client.call_count(), 1);
    assert_eq!(plan.name, "Model Plan");
    assert_eq!(plan.notes, ["Mind the budget"]);
    assert_eq!(plan.tasks[0].status, TaskStatus::Complete);

    let ready = planner.next_tasks(&PlanSelector::default()).await.unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].title, "Execute");
}

#[tokio::test]
async fn test_create_plan_from_text_falls_back_when_model_fails() {
    // The script is empty, so every model call fails
    let client = Arc::new(ScriptedLlmClient::new(
        Vec::<std::result::Result<String, LlmError>>::new(),
    ));
    let (_temp_dir, planner) = create_scripted_planner(client.clone()).await;

    let plan = planner
        .create_plan_from_text(&TextToPlan {
            text: "1. Write tests\n2. Fix bugs".to_string(),
            name: Some("Fallback".to_string()),
        })
        .await
        .expect("Parsing never fails");

    assert!(client.call_count() > 0);
    assert_eq!(plan.name, "Fallback");
    assert_eq!(plan.tasks.len(), 2);
}

#[tokio::test]
async fn test_create_plan_from_text_rejects_blank_text() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .create_plan_from_text(&TextToPlan {
            text: " \n ".to_string(),
            name: None,
        })
        .await;

    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_update_plan_keeps_unset_fields() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = planner
        .create_plan(&CreatePlan {
            name: "Original".to_string(),
            description: Some("Keep me".to_string()),
            notes: vec!["note".to_string()],
        })
        .await
        .unwrap();

    let updated = planner
        .update_plan(&UpdatePlan {
            id: plan.id.clone(),
            name: Some("Renamed".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to update plan");

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.description.as_deref(), Some("Keep me"));
    assert_eq!(updated.notes, ["note"]);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_update_missing_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .update_plan(&UpdatePlan {
            id: "missing".to_string(),
            name: Some("x".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(PlannerError::PlanNotFound { id }) if id == "missing"));
}

#[tokio::test]
async fn test_delete_plan_requires_confirmation() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Keep").await;

    let result = planner
        .delete_plan(&DeletePlan {
            id: plan.id.clone(),
            confirmed: false,
        })
        .await;

    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    assert_eq!(planner.list_plans().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_current_plan_clears_pointer() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Doomed").await;
    planner
        .set_current_plan(&PlanId { id: plan.id.clone() })
        .await
        .unwrap();

    let deleted = planner
        .delete_plan(&DeletePlan {
            id: plan.id.clone(),
            confirmed: true,
        })
        .await
        .unwrap();

    assert_eq!(deleted.map(|p| p.id), Some(plan.id.clone()));
    assert!(planner.get_current_plan().await.unwrap().is_none());
    assert!(planner.store().current_plan_id().unwrap().is_none());

    let again = planner
        .delete_plan(&DeletePlan {
            id: plan.id,
            confirmed: true,
        })
        .await
        .unwrap();
    assert!(again.is_none());
}

#[tokio::test]
async fn test_delete_other_plan_keeps_pointer() {
    let (_temp_dir, planner) = create_test_planner().await;
    let kept = create_named_plan(&planner, "Kept").await;
    let other = create_named_plan(&planner, "Other").await;
    planner
        .set_current_plan(&PlanId { id: kept.id.clone() })
        .await
        .unwrap();

    planner
        .delete_plan(&DeletePlan {
            id: other.id,
            confirmed: true,
        })
        .await
        .unwrap();

    let current = planner.get_current_plan().await.unwrap().unwrap();
    assert_eq!(current.id, kept.id);
}

#[tokio::test]
async fn test_set_current_plan_requires_existing_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .set_current_plan(&PlanId {
            id: "nope".to_string(),
        })
        .await;

    assert!(matches!(result, Err(PlannerError::PlanNotFound { .. })));
    assert!(planner.get_current_plan().await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_current_plan() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Current").await;
    planner.set_current_plan(&PlanId { id: plan.id }).await.unwrap();

    planner.clear_current_plan().await.unwrap();
    assert!(planner.get_current_plan().await.unwrap().is_none());
}

#[tokio::test]
async fn test_task_crud() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Tasks").await;
    let task_id = add_task(&planner, &plan.id, "Write code", Some(1)).await;

    let task = planner.get_task(&task_ref(&plan.id, &task_id)).await.unwrap();
    assert_eq!(task.title, "Write code");
    assert_eq!(task.status, TaskStatus::Pending);

    let updated = planner
        .update_task(&UpdateTask {
            plan_id: Some(plan.id.clone()),
            task_id: task_id.clone(),
            description: Some("All of it".to_string()),
            status: Some("pending for review".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to update task");
    assert_eq!(updated.title, "Write code");
    assert_eq!(updated.description.as_deref(), Some("All of it"));
    assert_eq!(updated.status, TaskStatus::PendingForReview);
    assert!(updated.updated_at.is_some());

    let tasks = planner.list_tasks(&selector(&plan.id)).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], updated);

    let deleted = planner
        .delete_task(&task_ref(&plan.id, &task_id))
        .await
        .unwrap();
    assert_eq!(deleted.id, task_id);
    assert!(planner.list_tasks(&selector(&plan.id)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_task_rejects_unknown_status() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Strict").await;
    let task_id = add_task(&planner, &plan.id, "Task", None).await;

    let result = planner
        .update_task(&UpdateTask {
            plan_id: Some(plan.id.clone()),
            task_id: task_id.clone(),
            status: Some("done".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    let task = planner.get_task(&task_ref(&plan.id, &task_id)).await.unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_missing_task_errors() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Empty").await;

    let get = planner.get_task(&task_ref(&plan.id, "ghost")).await;
    assert!(matches!(get, Err(PlannerError::TaskNotFound { id }) if id == "ghost"));

    let status = planner
        .update_task_status(&UpdateTaskStatus {
            plan_id: Some(plan.id.clone()),
            task_id: "ghost".to_string(),
            status: TaskStatus::Working,
        })
        .await;
    assert!(matches!(status, Err(PlannerError::TaskNotFound { .. })));

    let delete = planner.delete_task(&task_ref(&plan.id, "ghost")).await;
    assert!(matches!(delete, Err(PlannerError::TaskNotFound { .. })));
}

#[tokio::test]
async fn test_task_operations_default_to_current_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let no_plan = planner
        .create_task(&CreateTask {
            title: "Orphan".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(no_plan, Err(PlannerError::NoCurrentPlan)));

    let plan = create_named_plan(&planner, "Current").await;
    planner
        .set_current_plan(&PlanId { id: plan.id.clone() })
        .await
        .unwrap();

    let task = planner
        .create_task(&CreateTask {
            title: "Adopted".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let stored = planner.show_plan(&PlanSelector::default()).await.unwrap();
    assert_eq!(stored.id, plan.id);
    assert_eq!(stored.tasks[0].id, task.id);
}

#[tokio::test]
async fn test_update_task_status_refreshes_timestamps() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Timestamps").await;
    let task_id = add_task(&planner, &plan.id, "Task", None).await;

    let task = planner
        .update_task_status(&UpdateTaskStatus {
            plan_id: Some(plan.id.clone()),
            task_id,
            status: TaskStatus::Working,
        })
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Working);
    assert!(task.updated_at.is_some());

    let stored = planner.show_plan(&selector(&plan.id)).await.unwrap();
    assert!(stored.updated_at.is_some());
}

#[tokio::test]
async fn test_next_tasks_respects_dependencies_and_order() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Pipeline").await;
    let design = add_task(&planner, &plan.id, "Design", Some(1)).await;
    planner
        .create_task(&CreateTask {
            plan_id: Some(plan.id.clone()),
            title: "Build".to_string(),
            order: Some(2),
            dependencies: vec![design.clone()],
            ..Default::default()
        })
        .await
        .unwrap();
    add_task(&planner, &plan.id, "Docs", None).await;

    let ready = planner.next_tasks(&selector(&plan.id)).await.unwrap();
    let titles: Vec<&str> = ready.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Design", "Docs"]);

    planner
        .update_task_status(&UpdateTaskStatus {
            plan_id: Some(plan.id.clone()),
            task_id: design,
            status: TaskStatus::Complete,
        })
        .await
        .unwrap();

    let ready = planner.next_tasks(&selector(&plan.id)).await.unwrap();
    let titles: Vec<&str> = ready.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Build", "Docs"]);
}

#[tokio::test]
async fn test_next_tasks_without_current_plan_is_empty() {
    let (_temp_dir, planner) = create_test_planner().await;

    let ready = planner.next_tasks(&PlanSelector::default()).await.unwrap();
    assert!(ready.is_empty());

    let missing = planner.next_tasks(&selector("missing")).await;
    assert!(matches!(missing, Err(PlannerError::PlanNotFound { .. })));
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Comments").await;
    let task_id = add_task(&planner, &plan.id, "Review", None).await;

    let note = planner
        .add_comment(&AddComment {
            plan_id: Some(plan.id.clone()),
            task_id: task_id.clone(),
            content: "  Looks good  ".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(note.content, "Looks good");
    assert_eq!(note.comment_type, CommentType::Note);

    let question = planner
        .add_comment(&AddComment {
            plan_id: Some(plan.id.clone()),
            task_id: task_id.clone(),
            content: "What about tests?".to_string(),
            comment_type: CommentType::Question,
        })
        .await
        .unwrap();

    let comments = planner
        .list_comments(&task_ref(&plan.id, &task_id))
        .await
        .unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, note.id);
    assert_eq!(comments[1].id, question.id);

    let removed = planner
        .delete_comment(&RemoveComment {
            plan_id: Some(plan.id.clone()),
            task_id: task_id.clone(),
            comment_id: note.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(removed.id, note.id);

    let comments = planner
        .list_comments(&task_ref(&plan.id, &task_id))
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);

    let missing = planner
        .delete_comment(&RemoveComment {
            plan_id: Some(plan.id),
            task_id,
            comment_id: note.id,
        })
        .await;
    assert!(matches!(missing, Err(PlannerError::CommentNotFound { .. })));
}

#[tokio::test]
async fn test_add_comment_rejects_blank_content() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan = create_named_plan(&planner, "Blank").await;
    let task_id = add_task(&planner, &plan.id, "Task", None).await;

    let result = planner
        .add_comment(&AddComment {
            plan_id: Some(plan.id.clone()),
            task_id: task_id.clone(),
            content: "   ".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    let comments = planner
        .list_comments(&task_ref(&plan.id, &task_id))
        .await
        .unwrap();
    assert!(comments.is_empty());
}

#[tokio::test]
async fn test_concurrent_task_creation_keeps_every_task() {
    let (_temp_dir, planner) = create_test_planner().await;
    let planner = Arc::new(planner);
    let plan = create_named_plan(&planner, "Busy").await;

    let mut handles = Vec::new();
    for index in 0..8 {
        let planner = Arc::clone(&planner);
        let plan_id = plan.id.clone();
        handles.push(tokio::spawn(async move {
            add_task(&planner, &plan_id, &format!("Task {index}"), Some(index)).await
        }));
    }
    for handle in handles {
        handle.await.expect("task panicked");
    }

    let tasks = planner.list_tasks(&selector(&plan.id)).await.unwrap();
    assert_eq!(tasks.len(), 8);
}
