use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateTenantRequest {
    pub name: String,
}
