use thiserror::Error;

pub mod credential;
pub mod database;

pub use credential::CredentialError;
pub use database::DatabaseError;

/// Internal error type for store and service operations
///
/// Separates infrastructure errors (database, crypto) from credential outcomes.
/// Not exposed via API - endpoints convert to AuthError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation { operation: operation.to_string(), source })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// True when the store could not be reached or the write did not land
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, InternalError::Database(_))
    }

    /// The credential outcome carried by this error, if any
    pub fn credential(&self) -> Option<&CredentialError> {
        match self {
            InternalError::Credential(err) => Some(err),
            _ => None,
        }
    }
}
