//! Command handlers for the Waypoint CLI
//!
//! Each handler converts clap arguments into core parameters, calls the
//! planner and renders the markdown produced by the core display types.

use std::{fs, io};

use anyhow::{bail, Context, Result};
use log::debug;
use waypoint_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::{PlanId, PlanSelector, TaskRef, TextToPlan, UpdateTask},
    Planner, PlannerError, UpdateTaskRequest,
};

use crate::{
    args::{CommentCommands, ParsePlanArgs, PlanCommands, TaskCommands, UsePlanArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.planner.create_plan(&args.into()).await?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::Parse(args) => self.parse_plan(args).await,
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let plan = self.planner.show_plan(&args.into()).await?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Update(args) => {
                let mut changes = Vec::new();
                if let Some(name) = &args.name {
                    changes.push(format!("Renamed to '{name}'"));
                }
                if args.description.is_some() {
                    changes.push("Updated description".to_string());
                }
                if args.notes.is_some() {
                    changes.push("Replaced notes".to_string());
                }
                let plan = self.planner.update_plan(&args.into()).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(plan, changes).to_string())
            }
            PlanCommands::Use(args) => self.use_plan(args).await,
            PlanCommands::Delete(args) => {
                let id = args.id.clone();
                match self.planner.delete_plan(&args.into()).await? {
                    Some(plan) => self.renderer.render(&DeleteResult::new(plan).to_string()),
                    None => Err(PlannerError::PlanNotFound { id }.into()),
                }
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self.planner.create_task(&args.into()).await?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::List(args) => {
                let tasks = self.planner.list_tasks(&args.into()).await?;
                self.renderer.render(&tasks.to_string())
            }
            TaskCommands::Show(args) => {
                let task = self.planner.get_task(&args.into()).await?;
                self.renderer.render(&task.to_string())
            }
            TaskCommands::Update(args) => {
                let params = UpdateTask::from(args);
                let changes = UpdateTaskRequest::try_from(params.clone())?.describe_changes();
                let task = self.planner.update_task(&params).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(task, changes).to_string())
            }
            TaskCommands::Status(args) => {
                let task = self.planner.update_task_status(&args.into()).await?;
                let changes = vec![format!("Changed status to {}", task.status)];
                self.renderer
                    .render(&UpdateResult::with_changes(task, changes).to_string())
            }
            TaskCommands::Delete(args) => {
                let task = self.planner.delete_task(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
        }
    }

    pub async fn handle_comment_command(&self, command: CommentCommands) -> Result<()> {
        match command {
            CommentCommands::Add(args) => {
                let comment = self.planner.add_comment(&args.into()).await?;
                self.renderer.render(&CreateResult::new(comment).to_string())
            }
            CommentCommands::List(args) => {
                let comments = self.planner.list_comments(&TaskRef::from(args)).await?;
                self.renderer.render(&comments.to_string())
            }
            CommentCommands::Delete(args) => {
                let comment = self.planner.delete_comment(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(comment).to_string())
            }
        }
    }

    pub async fn next_tasks(&self, params: &PlanSelector) -> Result<()> {
        let ready = self.planner.next_tasks(params).await?;
        if ready.is_empty() {
            return self.renderer.render(&ready.to_string());
        }
        self.renderer
            .render(&format!("# Next Tasks\n\n{ready}"))
    }

    /// Shows the current plan, or the plan list when no plan is current.
    pub async fn overview(&self) -> Result<()> {
        match self.planner.get_current_plan().await? {
            Some(plan) => self.renderer.render(&plan.to_string()),
            None => self.list_plans().await,
        }
    }

    async fn list_plans(&self) -> Result<()> {
        let summaries = self.planner.list_plans_summary().await?;
        if summaries.is_empty() {
            return self.renderer.render(&summaries.to_string());
        }
        self.renderer.render(&format!("# Plans\n\n{summaries}"))
    }

    async fn parse_plan(&self, args: ParsePlanArgs) -> Result<()> {
        let text = match (args.text, args.file) {
            (Some(text), _) => text,
            (None, Some(path)) => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read plan text from {}", path.display()))?,
            (None, None) => {
                debug!("Reading plan text from stdin");
                io::read_to_string(io::stdin()).context("Failed to read plan text from stdin")?
            }
        };
        if text.trim().is_empty() {
            bail!("Plan text is empty");
        }

        let plan = self
            .planner
            .create_plan_from_text(&TextToPlan {
                text,
                name: args.name,
            })
            .await?;
        self.renderer.render(&CreateResult::new(plan).to_string())
    }

    async fn use_plan(&self, args: UsePlanArgs) -> Result<()> {
        let Some(id) = args.id else {
            self.planner.clear_current_plan().await?;
            return self
                .renderer
                .render(&OperationStatus::success("No plan is current").to_string());
        };

        let plan = self.planner.set_current_plan(&PlanId { id }).await?;
        self.renderer.render(
            &OperationStatus::success(format!("Now tracking plan '{}' (ID: {})", plan.name, plan.id))
                .to_string(),
        )
    }
}
