use crate::{AuthError, Claims, Result as AuthErrorResult};

use tt_core::User;

use std::panic::Location;

use chrono::{Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

/// Signs HS256 access tokens for authenticated users
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl JwtIssuer {
    pub fn with_hs256(secret: &[u8], ttl_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl: Duration::minutes(i64::try_from(ttl_minutes).unwrap_or(i64::MAX / 60_000)),
        }
    }

    /// Build the claim set for `user`, valid from now for the configured lifetime
    pub fn claims_for(&self, user: &User) -> Claims {
        let now = Utc::now();
        Claims {
            sub: user.id.to_string(),
            tenant_id: user.tenant_id.to_string(),
            role: user.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        }
    }

    #[track_caller]
    pub fn issue(&self, user: &User) -> AuthErrorResult<String> {
        self.encode(&self.claims_for(user))
    }

    #[track_caller]
    pub fn encode(&self, claims: &Claims) -> AuthErrorResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    pub fn ttl_minutes(&self) -> i64 {
        self.ttl.num_minutes()
    }
}
