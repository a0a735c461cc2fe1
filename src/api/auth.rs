use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::helpers::{require_identity, BasicAuth};
use crate::errors::AuthError;
use crate::services::AuthService;
use crate::types::dto::auth::{IdentityResponse, LoginRequest};

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
}

impl AuthApi {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Check a username and password and return the resulting identity
    ///
    /// Public. Unknown usernames and wrong passwords produce the same error.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<IdentityResponse>, AuthError> {
        let identity = self
            .auth_service
            .authenticate(&body.username, &body.password)
            .await?;

        Ok(Json(identity.into()))
    }

    /// Return the identity behind the supplied Basic credentials
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BasicAuth) -> Result<Json<IdentityResponse>, AuthError> {
        let identity = require_identity(&self.auth_service, &auth).await?;

        Ok(Json(identity.into()))
    }
}
