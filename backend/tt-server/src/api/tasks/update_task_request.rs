use serde::{Deserialize, Deserializer};

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,

    /// `null` clears the description
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,

    #[serde(default)]
    pub status: Option<String>,

    /// `null` unassigns the task
    #[serde(default, deserialize_with = "present")]
    pub assigned_user_id: Option<Option<i64>>,

    #[serde(default)]
    pub completed: Option<bool>,
}

/// Distinguishes an explicit `null` (Some(None)) from a missing key (None)
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
