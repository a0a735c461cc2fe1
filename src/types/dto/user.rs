use poem_openapi::{ApiResponse, Object};
use poem_openapi::payload::Json;
use serde::{Deserialize, Serialize};

use crate::types::internal::UserRecord;

/// Request model for registering a new user
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username
    #[oai(validator(min_length = 1))]
    pub username: String,

    /// Plaintext password, hashed before it is stored
    #[oai(validator(min_length = 1))]
    pub password: String,
}

#[derive(ApiResponse)]
pub enum RegisterApiResponse {
    /// User registered
    #[oai(status = 201)]
    Created(Json<RegisteredUserResponse>),
}

/// Response model for a newly registered user
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisteredUserResponse {
    pub id: i32,
    pub username: String,
}

/// Public view of a stored user; the password hash is never exposed
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub enabled: bool,
    pub account_non_expired: bool,
    pub credentials_non_expired: bool,
    pub account_non_locked: bool,
    pub roles: Vec<String>,
}

/// Response model for the user listing
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}

impl From<UserRecord> for UserSummary {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id.unwrap_or_default(),
            username: record.username,
            enabled: record.enabled,
            account_non_expired: record.account_non_expired,
            credentials_non_expired: record.credentials_non_expired,
            account_non_locked: record.account_non_locked,
            roles: record.roles.into_iter().map(|r| r.role).collect(),
        }
    }
}
