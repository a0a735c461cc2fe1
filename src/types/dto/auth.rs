use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::AuthenticatedIdentity;

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model describing an authenticated identity
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// Authenticated username
    pub username: String,

    /// Authorities granted through the user's roles, sorted
    pub authorities: Vec<String>,
}

impl From<AuthenticatedIdentity> for IdentityResponse {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self {
            username: identity.username,
            authorities: identity.authorities.into_iter().collect(),
        }
    }
}
