pub mod bearer;
pub mod claims;
pub mod error;
pub mod jwt_issuer;
pub mod jwt_validator;
pub mod password;
pub mod tenant_context;

pub use bearer::extract_bearer;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_issuer::JwtIssuer;
pub use jwt_validator::JwtValidator;
pub use password::{hash_password, verify_password};
pub use tenant_context::TenantContext;

#[cfg(test)]
mod tests;
