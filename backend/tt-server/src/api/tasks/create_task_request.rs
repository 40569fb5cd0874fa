use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// "todo" (default), "in_progress" or "done"
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub assigned_user_id: Option<i64>,
}
