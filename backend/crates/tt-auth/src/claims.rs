use crate::{AuthError, Result as AuthErrorResult};

use tt_core::UserRole;

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

const MAX_TENANT_ID_LENGTH: usize = 128;

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Tenant the user belonged to when the token was issued
    pub tenant_id: String,
    /// `admin` or `member`
    pub role: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.tenant_id.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "tenant_id".to_string(),
                message: "tenant_id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.tenant_id.len() > MAX_TENANT_ID_LENGTH {
            return Err(AuthError::InvalidClaim {
                claim: "tenant_id".to_string(),
                message: "tenant_id exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user_id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.user_id()?;
        self.tenant_id()?;
        self.role()?;

        Ok(())
    }

    #[track_caller]
    pub fn user_id(&self) -> AuthErrorResult<i64> {
        parse_id("sub", &self.sub)
    }

    #[track_caller]
    pub fn tenant_id(&self) -> AuthErrorResult<i64> {
        parse_id("tenant_id", &self.tenant_id)
    }

    #[track_caller]
    pub fn role(&self) -> AuthErrorResult<UserRole> {
        UserRole::from_str(&self.role).map_err(|_| AuthError::InvalidClaim {
            claim: "role".to_string(),
            message: format!("unknown role '{}'", self.role),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[track_caller]
fn parse_id(claim: &str, value: &str) -> AuthErrorResult<i64> {
    value.parse::<i64>().map_err(|_| AuthError::InvalidClaim {
        claim: claim.to_string(),
        message: format!("{} must be a numeric id", claim),
        location: ErrorLocation::from(Location::caller()),
    })
}
