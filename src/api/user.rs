use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::helpers::{require_identity, BasicAuth};
use crate::errors::AuthError;
use crate::services::AuthService;
use crate::types::dto::user::{
    RegisterApiResponse, RegisterRequest, RegisteredUserResponse, UserListResponse, UserSummary,
};

/// Registration and user listing endpoints
pub struct UserApi {
    auth_service: Arc<AuthService>,
}

impl UserApi {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

#[derive(Tags)]
enum UserTags {
    /// User registration and listing
    Users,
}

#[OpenApi]
impl UserApi {
    /// Register a new user
    ///
    /// Public. The password is hashed before it is stored.
    #[oai(path = "/register", method = "post", tag = "UserTags::Users")]
    async fn register(&self, body: Json<RegisterRequest>) -> Result<RegisterApiResponse, AuthError> {
        let saved = self.auth_service.register(&body.username, &body.password).await?;

        Ok(RegisterApiResponse::Created(Json(RegisteredUserResponse {
            id: saved.id.unwrap_or_default(),
            username: saved.username,
        })))
    }

    /// List every registered user
    ///
    /// Requires HTTP Basic authentication.
    #[oai(path = "/users", method = "get", tag = "UserTags::Users")]
    async fn list_users(&self, auth: BasicAuth) -> Result<Json<UserListResponse>, AuthError> {
        let identity = require_identity(&self.auth_service, &auth).await?;
        tracing::debug!(username = %identity.username, "Listing users");

        let users = self.auth_service.list_users().await?;

        Ok(Json(UserListResponse {
            users: users.into_iter().map(UserSummary::from).collect(),
        }))
    }
}
