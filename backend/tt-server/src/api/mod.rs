pub mod auth;
pub mod error;
pub mod extractors;
pub mod message_response;
pub mod request_validator;
pub mod tasks;
pub mod tenants;
pub mod users;
