use poem_openapi::{auth::Basic, SecurityScheme};

use crate::errors::AuthError;
use crate::services::AuthService;
use crate::types::internal::AuthenticatedIdentity;

/// HTTP Basic credentials guarding the protected endpoints
#[derive(SecurityScheme)]
#[oai(ty = "basic")]
pub struct BasicAuth(pub Basic);

/// Authenticate the Basic credentials of a request
///
/// Any successful authentication grants access; there is no per-authority check.
pub async fn require_identity(
    auth_service: &AuthService,
    auth: &BasicAuth,
) -> Result<AuthenticatedIdentity, AuthError> {
    auth_service
        .authenticate(&auth.0.username, &auth.0.password)
        .await
        .map_err(AuthError::from)
}
