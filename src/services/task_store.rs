use std::sync::Arc;

use log::{error, info};

use crate::client::{ApiError, HealthApi};
use crate::models::task::{NewTask, Task, TaskFilter, TaskStats};
use crate::utils::validation::validate_payload;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Asked before a task is deleted; answering `false` cancels the deletion.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl Confirm for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Cancelled,
}

/// The user's task list under one filter. The upstream owns the data; every
/// successful change is followed by a refetch.
pub struct TaskStore {
    api: Arc<dyn HealthApi>,
    filter: TaskFilter,
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(api: Arc<dyn HealthApi>) -> Self {
        TaskStore::with_filter(api, TaskFilter::All)
    }

    /// Starts empty under `filter`; nothing is fetched until the first call.
    pub fn with_filter(api: Arc<dyn HealthApi>, filter: TaskFilter) -> Self {
        TaskStore {
            api,
            filter,
            tasks: Vec::new(),
        }
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub async fn refresh(&mut self) -> Result<&[Task], ApiError> {
        self.tasks = self.api.list_tasks(self.filter.completed()).await.map_err(|e| {
            error!("Error fetching tasks: {}", e);
            e
        })?;
        Ok(&self.tasks)
    }

    pub async fn set_filter(&mut self, filter: TaskFilter) -> Result<&[Task], ApiError> {
        self.filter = filter;
        self.refresh().await
    }

    pub async fn create(&mut self, task: NewTask) -> Result<&[Task], ApiError> {
        validate_payload(&task)?;

        self.api.create_task(&task).await.map_err(|e| {
            error!("Error creating task: {}", e);
            e
        })?;
        info!("Created task {:?}", task.title);
        self.refresh().await
    }

    pub async fn toggle(&mut self, id: &str) -> Result<&[Task], ApiError> {
        self.api.toggle_task(id).await.map_err(|e| {
            error!("Error toggling task {}: {}", id, e);
            e
        })?;
        self.refresh().await
    }

    pub async fn delete(&mut self, id: &str, confirm: &impl Confirm) -> Result<Deletion, ApiError> {
        if !confirm.confirm(DELETE_PROMPT) {
            info!("Deletion of task {} cancelled", id);
            return Ok(Deletion::Cancelled);
        }

        self.api.delete_task(id).await.map_err(|e| {
            error!("Error deleting task {}: {}", id, e);
            e
        })?;
        self.refresh().await?;
        Ok(Deletion::Deleted)
    }

    /// Server-side counts across all of the user's tasks.
    pub async fn stats(&self) -> Result<TaskStats, ApiError> {
        self.api.task_stats().await.map_err(|e| {
            error!("Error fetching task stats: {}", e);
            e
        })
    }

    /// Counts over the currently loaded list only.
    pub fn summarize(&self) -> TaskStats {
        TaskStats::summarize(&self.tasks)
    }
}
