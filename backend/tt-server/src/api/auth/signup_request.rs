use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    /// Name of the team to create; the caller becomes its admin
    pub tenant_name: String,
}
