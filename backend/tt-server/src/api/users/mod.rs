pub mod invite_user_request;
pub mod users;
