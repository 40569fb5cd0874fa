use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Clock skew tolerance applied to `exp`
const LEEWAY_SECS: u64 = 30;

/// Verifies bearer tokens issued by [`crate::JwtIssuer`]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    /// Create validator with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECS;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signature, expiry and claim sanity, in that order
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let location = ErrorLocation::from(Location::caller());
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| decode_error(e, location))?
            .claims;

        claims.validate()?;
        Ok(claims)
    }
}

fn decode_error(e: jsonwebtoken::errors::Error, location: ErrorLocation) -> AuthError {
    match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired { location },
        _ => AuthError::JwtDecode {
            source: e,
            location,
        },
    }
}
