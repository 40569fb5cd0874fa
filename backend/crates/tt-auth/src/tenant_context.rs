use crate::{Claims, Result as AuthErrorResult};

use tt_core::UserRole;

/// Extracted tenant context available to handlers.
/// This is the validated, trusted context after JWT verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: i64,
    pub user_id: i64,
    pub role: UserRole,
}

impl TenantContext {
    #[track_caller]
    pub fn from_claims(claims: &Claims) -> AuthErrorResult<Self> {
        Ok(Self {
            tenant_id: claims.tenant_id()?,
            user_id: claims.user_id()?,
            role: claims.role()?,
        })
    }

    /// Broadcast routing key for this tenant
    pub fn tenant_key(&self) -> String {
        self.tenant_id.to_string()
    }
}
