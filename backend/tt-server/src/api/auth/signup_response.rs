use tt_core::User;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: User,
    pub access_token: String,
    pub token_type: &'static str,
}
