use crate::errors::internal::{CredentialError, InternalError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Account is disabled
    #[oai(status = 401)]
    AccountDisabled(Json<AuthErrorResponse>),

    /// Account has expired
    #[oai(status = 401)]
    AccountExpired(Json<AuthErrorResponse>),

    /// Credentials have expired
    #[oai(status = 401)]
    CredentialsExpired(Json<AuthErrorResponse>),

    /// Account is locked
    #[oai(status = 401)]
    AccountLocked(Json<AuthErrorResponse>),

    /// Username already exists
    #[oai(status = 400)]
    DuplicateUsername(Json<AuthErrorResponse>),

    /// Registration input rejected
    #[oai(status = 400)]
    InvalidRegistration(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    fn response(error: &str, message: &str, status_code: u16) -> Json<AuthErrorResponse> {
        Json(AuthErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
            status_code,
        })
    }

    /// Create an InvalidCredentials error
    ///
    /// Used for both unknown usernames and wrong passwords.
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Self::response(
            "invalid_credentials",
            "Invalid username or password",
            401,
        ))
    }

    pub fn account_disabled() -> Self {
        AuthError::AccountDisabled(Self::response("account_disabled", "Account is disabled", 401))
    }

    pub fn account_expired() -> Self {
        AuthError::AccountExpired(Self::response("account_expired", "Account has expired", 401))
    }

    pub fn credentials_expired() -> Self {
        AuthError::CredentialsExpired(Self::response(
            "credentials_expired",
            "Credentials have expired",
            401,
        ))
    }

    pub fn account_locked() -> Self {
        AuthError::AccountLocked(Self::response("account_locked", "Account is locked", 401))
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username() -> Self {
        AuthError::DuplicateUsername(Self::response(
            "duplicate_username",
            "Username already exists",
            400,
        ))
    }

    pub fn invalid_registration(reason: &str) -> Self {
        AuthError::InvalidRegistration(Self::response("invalid_registration", reason, 400))
    }

    /// Create a generic InternalError that hides the underlying cause
    pub fn internal_server_error() -> Self {
        AuthError::InternalError(Self::response(
            "internal_error",
            "An internal error occurred",
            500,
        ))
    }

    /// Convert an internal error into its API representation
    ///
    /// Infrastructure details are logged here and never returned to the client.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(_) => {
                tracing::error!("Credential store unavailable: {}", err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Credential(CredentialError::UnknownUser(username)) => {
                tracing::debug!("Login attempt for unknown user: {}", username);
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::BadCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::Disabled(username)) => {
                tracing::info!("Login rejected for disabled account: {}", username);
                Self::account_disabled()
            }
            InternalError::Credential(CredentialError::AccountExpired(username)) => {
                tracing::info!("Login rejected for expired account: {}", username);
                Self::account_expired()
            }
            InternalError::Credential(CredentialError::CredentialsExpired(username)) => {
                tracing::info!("Login rejected for expired credentials: {}", username);
                Self::credentials_expired()
            }
            InternalError::Credential(CredentialError::AccountLocked(username)) => {
                tracing::info!("Login rejected for locked account: {}", username);
                Self::account_locked()
            }
            InternalError::Credential(CredentialError::DuplicateUsername(username)) => {
                tracing::warn!("Duplicate username attempt: {}", username);
                Self::duplicate_username()
            }
            InternalError::Credential(CredentialError::InvalidRegistration(reason)) => {
                tracing::debug!("Registration rejected: {}", reason);
                Self::invalid_registration(reason)
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    /// Get the machine-readable error code
    pub fn code(&self) -> &str {
        &self.body().error
    }

    fn body(&self) -> &AuthErrorResponse {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::AccountDisabled(json)
            | AuthError::AccountExpired(json)
            | AuthError::CredentialsExpired(json)
            | AuthError::AccountLocked(json)
            | AuthError::DuplicateUsername(json)
            | AuthError::InvalidRegistration(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
