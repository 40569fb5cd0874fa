use tt_core::UserRole;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct InviteUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}
