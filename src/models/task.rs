use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::not_blank;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Workout,
    Meal,
    Hydration,
    Sleep,
    Medication,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Body of a create request. Only the title is checked locally; the due date
/// is forwarded as typed and parsed by the remote.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[validate(custom(function = "not_blank", message = "Task title is required"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct TaskList {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    /// Value of the `completed` query parameter; `None` means no constraint.
    pub fn completed(self) -> Option<bool> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Pending => Some(false),
            TaskFilter::Completed => Some(true),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    #[serde(default)]
    pub completed_tasks: Option<u32>,
    #[serde(default)]
    pub pending_tasks: Option<u32>,
    #[serde(default)]
    pub completion_rate: Option<u32>,
}

impl TaskStats {
    pub fn summarize(tasks: &[Task]) -> Self {
        let total = tasks.len() as u32;
        let completed = tasks.iter().filter(|task| task.completed).count() as u32;
        let rate = if total == 0 {
            0
        } else {
            (f64::from(completed) * 100.0 / f64::from(total)).round() as u32
        };

        TaskStats {
            completed_tasks: Some(completed),
            pending_tasks: Some(total - completed),
            completion_rate: Some(rate),
        }
    }

    pub fn total(&self) -> Option<u32> {
        Some(self.completed_tasks? + self.pending_tasks?)
    }
}
