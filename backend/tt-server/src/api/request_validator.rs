use crate::{ApiError, ApiResult};

use tt_config::ValidationConfig;

/// Field checks shared by the REST handlers. Each returns the value to persist.
pub struct RequestValidator;

impl RequestValidator {
    /// Trimmed, non-empty, within `max_title_length`
    #[track_caller]
    pub fn title(value: &str, config: &ValidationConfig) -> ApiResult<String> {
        Self::bounded_text("title", value, config.max_title_length)
    }

    /// Tenant names share the title limit
    #[track_caller]
    pub fn tenant_name(value: &str, config: &ValidationConfig) -> ApiResult<String> {
        Self::bounded_text("tenant_name", value, config.max_title_length)
    }

    #[track_caller]
    pub fn description(
        value: Option<&str>,
        config: &ValidationConfig,
    ) -> ApiResult<Option<String>> {
        let Some(value) = value else {
            return Ok(None);
        };

        if value.chars().count() > config.max_description_length {
            return Err(ApiError::validation(
                "description",
                format!(
                    "description must not exceed {} characters",
                    config.max_description_length
                ),
            ));
        }

        Ok(Some(value.to_string()))
    }

    /// Structural check only: `local@domain.tld`, no whitespace
    #[track_caller]
    pub fn email(value: &str) -> ApiResult<String> {
        let email = value.trim();

        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };

        if !valid {
            return Err(ApiError::validation(
                "email",
                format!("'{}' is not a valid email address", email),
            ));
        }

        Ok(email.to_lowercase())
    }

    #[track_caller]
    pub fn password(value: &str) -> ApiResult<()> {
        if value.is_empty() {
            return Err(ApiError::validation("password", "password cannot be empty"));
        }
        Ok(())
    }

    #[track_caller]
    fn bounded_text(field: &str, value: &str, max_length: usize) -> ApiResult<String> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ApiError::validation(field, format!("{} cannot be empty", field)));
        }

        if trimmed.chars().count() > max_length {
            return Err(ApiError::validation(
                field,
                format!("{} must not exceed {} characters", field, max_length),
            ));
        }

        Ok(trimmed.to_string())
    }
}
