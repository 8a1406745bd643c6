use futures_util::future::join3;
use log::{info, warn};
use serde::Serialize;

use crate::client::{ApiError, HealthApi};
use crate::models::bmi::BmiEntry;
use crate::models::task::TaskStats;
use crate::models::user::User;
use crate::services::session::Session;

/// Most recent BMI entries shown on the dashboard.
pub const BMI_HISTORY_LIMIT: usize = 10;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Section<T> {
    Ready { data: T },
    Failed { message: String },
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready { data } => Some(data),
            Section::Failed { .. } => None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatCards {
    pub current_bmi: String,
    pub completed_tasks: String,
    pub pending_tasks: String,
    pub completion_rate: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub profile: Section<User>,
    pub stats: Section<TaskStats>,
    pub bmi_history: Section<Vec<BmiEntry>>,
    pub cards: StatCards,
}

/// Fetches profile, task stats and BMI history concurrently. Each section
/// stands on its own: a failed fetch is logged and shown as `Failed` while the
/// rest render. An expired session aborts the whole refresh.
pub async fn refresh(api: &dyn HealthApi, session: &mut Session) -> Result<DashboardView, ApiError> {
    let (profile, stats, history) = join3(
        api.profile(),
        api.task_stats(),
        api.bmi_history(BMI_HISTORY_LIMIT),
    )
    .await;

    for err in [profile.as_ref().err(), stats.as_ref().err(), history.as_ref().err()]
        .into_iter()
        .flatten()
    {
        if err.is_session_expired() {
            session.clear();
            return Err(ApiError::SessionExpired);
        }
    }

    if let Ok(user) = &profile {
        session.replace_profile(user.clone());
    }

    let history = history.map(|mut entries| {
        entries.truncate(BMI_HISTORY_LIMIT);
        entries
    });

    let profile = section("profile", profile);
    let stats = section("task stats", stats);
    let bmi_history = section("BMI history", history);
    let cards = stat_cards(session, stats.ready());

    info!("Dashboard refreshed");
    Ok(DashboardView {
        profile,
        stats,
        bmi_history,
        cards,
    })
}

fn section<T>(name: &str, result: Result<T, ApiError>) -> Section<T> {
    match result {
        Ok(data) => Section::Ready { data },
        Err(err) => {
            warn!("Error fetching dashboard {}: {}", name, err);
            Section::Failed {
                message: err.to_string(),
            }
        }
    }
}

pub fn stat_cards(session: &Session, stats: Option<&TaskStats>) -> StatCards {
    let or_na = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    StatCards {
        current_bmi: or_na(session.current_bmi().map(|bmi| bmi.to_string())),
        completed_tasks: or_na(stats.and_then(|s| s.completed_tasks).map(|n| n.to_string())),
        pending_tasks: or_na(stats.and_then(|s| s.pending_tasks).map(|n| n.to_string())),
        completion_rate: or_na(stats.and_then(|s| s.completion_rate).map(|n| format!("{}%", n))),
    }
}
