use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Only tasks assigned to the caller
    #[serde(default)]
    pub is_my_tasks: bool,
}
