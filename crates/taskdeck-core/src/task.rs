use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub user_id: Option<i64>,
    pub file_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task together with its assigned user, as returned by the
/// project listing. Serializes as the task fields plus a `user` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWithUser {
    #[serde(flatten)]
    pub task: Task,
    pub user: Option<User>,
}

/// Input for creating a task. `project_id` always comes from the route,
/// never from the request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub project_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_id: Option<i64>,
}

/// Partial update. Absent fields leave the stored value untouched; an
/// explicit `null` clears `user_id`, `due_date`, or `file_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<Option<i64>>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_id: Option<Option<i64>>,
}

/// Distinguishes a field set to `null` (`Some(None)`) from one left out
/// of the body entirely (`None`).
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
