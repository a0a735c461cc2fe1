use thiserror::Error;

/// Registration and authentication outcomes that are not infrastructure failures
///
/// Every authentication failure keeps its own variant. Collapsing unknown-user and
/// bad-password into one message is left to the API layer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialError {
    #[error("User not found: {0}")]
    UnknownUser(String),

    #[error("Invalid credentials")]
    BadCredentials,

    #[error("Account is disabled: {0}")]
    Disabled(String),

    #[error("Account has expired: {0}")]
    AccountExpired(String),

    #[error("Credentials have expired: {0}")]
    CredentialsExpired(String),

    #[error("Account is locked: {0}")]
    AccountLocked(String),

    #[error("User already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid registration: {0}")]
    InvalidRegistration(&'static str),
}
