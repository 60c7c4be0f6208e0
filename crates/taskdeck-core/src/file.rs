use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata record for an uploaded file. Byte storage lives outside
/// this system; tasks reference files by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    pub id: i64,
    pub filename: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    pub filename: String,
    pub path: String,
}
