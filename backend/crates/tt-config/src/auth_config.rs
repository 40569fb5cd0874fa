use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_TOKEN_TTL_MINUTES, MAX_TOKEN_TTL_MINUTES,
    MIN_JWT_SECRET_LENGTH, MIN_TOKEN_TTL_MINUTES,
};

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret (at least 32 characters)
    pub jwt_secret: Option<String>,
    /// Access token lifetime
    pub token_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }
}

// Hand-written so the secret never reaches a log line
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = self.jwt_secret.as_deref().ok_or_else(|| {
            ConfigError::auth("auth.jwt_secret is required (set TT_AUTH_JWT_SECRET)")
        })?;

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        if self.token_ttl_minutes < MIN_TOKEN_TTL_MINUTES
            || self.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES
        {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_minutes must be {}-{}, got {}",
                MIN_TOKEN_TTL_MINUTES, MAX_TOKEN_TTL_MINUTES, self.token_ttl_minutes
            )));
        }

        Ok(())
    }
}
