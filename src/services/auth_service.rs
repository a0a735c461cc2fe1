use std::sync::Arc;

use crate::config::{DuplicateUsernamePolicy, RegistrationPolicy};
use crate::errors::internal::{CredentialError, InternalError};
use crate::services::PasswordHasher;
use crate::stores::CredentialStore;
use crate::types::internal::{AuthenticatedIdentity, RoleRecord, UserRecord};

/// Registration and authentication on top of a CredentialStore
///
/// Owns the hashing policy and the mapping from a stored record to an
/// authenticated identity. Each call is a single attempt against the store.
pub struct AuthService {
    credential_store: Arc<dyn CredentialStore>,
    password_hasher: Arc<PasswordHasher>,
    policy: RegistrationPolicy,
}

impl AuthService {
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        password_hasher: Arc<PasswordHasher>,
        policy: RegistrationPolicy,
    ) -> Self {
        Self {
            credential_store,
            password_hasher,
            policy,
        }
    }

    /// Hash the password and persist a new user record
    ///
    /// The record starts enabled, unexpired and unlocked, with the configured default
    /// roles (none unless configured). When the username is taken, the duplicate-username
    /// policy decides between rejecting and overwriting the existing record.
    ///
    /// # Errors
    /// * `CredentialError::InvalidRegistration` - blank username or empty password
    /// * `CredentialError::DuplicateUsername` - username taken under the reject policy
    /// * `InternalError::Database` - the store failed; nothing was persisted
    pub async fn register(&self, username: &str, password: &str) -> Result<UserRecord, InternalError> {
        if username.trim().is_empty() {
            return Err(CredentialError::InvalidRegistration("Username must not be blank").into());
        }
        if password.is_empty() {
            return Err(CredentialError::InvalidRegistration("Password must not be empty").into());
        }

        let password_hash = self.password_hasher.hash(password)?;
        let mut record = UserRecord::new(username, password_hash, &self.policy.default_roles);

        if self.policy.duplicate_username == DuplicateUsernamePolicy::Overwrite {
            match self.credential_store.find_by_username(username).await {
                Ok(existing) => {
                    tracing::info!(username, "Overwriting existing user on registration");
                    record.id = existing.id;
                }
                Err(InternalError::Credential(CredentialError::UnknownUser(_))) => {}
                Err(e) => return Err(e),
            }
        }

        let saved = self.credential_store.upsert(record).await?;

        tracing::info!(user_id = ?saved.id, username, "User registered");

        Ok(saved)
    }

    /// Verify a username and password and build the resulting identity
    ///
    /// The password is checked before the account status flags, and the flags are
    /// checked in a fixed order: lock, enabled, account expiry, credential expiry.
    /// An unknown username still runs one hash verification.
    /// Authorities are the role names verbatim.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedIdentity, InternalError> {
        let record = match self.credential_store.find_by_username(username).await {
            Ok(record) => record,
            Err(InternalError::Credential(CredentialError::UnknownUser(name))) => {
                // Pay the hash cost anyway so a miss times like a wrong password
                self.password_hasher.verify_placeholder(password)?;
                return Err(CredentialError::UnknownUser(name).into());
            }
            Err(e) => return Err(e),
        };

        if !self.password_hasher.verify(password, &record.password_hash)? {
            return Err(CredentialError::BadCredentials.into());
        }

        check_account_status(&record)?;

        tracing::debug!(username, "Authentication succeeded");

        Ok(AuthenticatedIdentity::from(&record))
    }

    /// All stored users, in no particular order
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, InternalError> {
        self.credential_store.list_all().await
    }

    /// Add a role to an existing user and persist the full record
    pub async fn grant_role(&self, username: &str, role: &str) -> Result<UserRecord, InternalError> {
        let mut record = self.credential_store.find_by_username(username).await?;
        record.roles.push(RoleRecord::new(role));

        let saved = self.credential_store.upsert(record).await?;

        tracing::info!(username, role, "Role granted");

        Ok(saved)
    }
}

fn check_account_status(record: &UserRecord) -> Result<(), CredentialError> {
    let username = || record.username.clone();

    if !record.account_non_locked {
        return Err(CredentialError::AccountLocked(username()));
    }
    if !record.enabled {
        return Err(CredentialError::Disabled(username()));
    }
    if !record.account_non_expired {
        return Err(CredentialError::AccountExpired(username()));
    }
    if !record.credentials_non_expired {
        return Err(CredentialError::CredentialsExpired(username()));
    }
    Ok(())
}
