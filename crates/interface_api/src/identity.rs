//! Gateway identity
//!
//! Authentication itself is delegated to the external auth gateway sitting
//! in front of this service; by the time a request lands here the gateway
//! has verified the session and forwards the caller's identity as headers:
//!
//! - `x-user-id`: the caller's profile id (UUID)
//! - `x-user-name`: display name used for reviewer stamps
//! - `x-user-role`: the caller's role wire name
//!
//! A missing or malformed user id is a 401. An unknown role string is kept
//! as `None` rather than rejected: role-scoped listings treat it as "sees
//! nothing" while role-gated actions refuse it with 403.

use axum::http::HeaderMap;

use core_kernel::{ProfileId, Role};

/// The authenticated caller, as asserted by the gateway
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: ProfileId,
    pub name: String,
    pub role: Option<Role>,
}

impl Identity {
    /// Builds an identity from gateway headers
    ///
    /// Returns `None` when the user id header is missing or not a UUID.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let user_id: ProfileId = headers
            .get("x-user-id")?
            .to_str()
            .ok()?
            .parse()
            .ok()?;

        let name = headers
            .get("x-user-name")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let role = headers
            .get("x-user-role")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Role>().ok());

        Some(Self {
            user_id,
            name,
            role,
        })
    }

    /// The caller's role, or a 403 when it does not match `required`
    pub fn require_role(&self, required: Role) -> Result<Role, crate::error::ApiError> {
        match self.role {
            Some(role) if role == required => Ok(role),
            _ => Err(crate::error::ApiError::Forbidden(format!(
                "requires role {required}"
            ))),
        }
    }

    /// Any reviewer role (controller or administrator), or a 403
    pub fn require_reviewer(&self) -> Result<Role, crate::error::ApiError> {
        match self.role {
            Some(role @ (Role::Controller | Role::Administrator)) => Ok(role),
            _ => Err(crate::error::ApiError::Forbidden(
                "requires a reviewer role".to_string(),
            )),
        }
    }
}
