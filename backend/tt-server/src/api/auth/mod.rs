pub mod auth;
pub mod login_request;
pub mod signup_request;
pub mod signup_response;
pub mod token_response;
