// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr, RuntimeErr};

use crate::config::{HashingSettings, RegistrationPolicy};
use crate::errors::InternalError;
use crate::services::{AuthService, PasswordHasher};
use crate::stores::{CredentialStore, DbCredentialStore};
use crate::types::internal::UserRecord;

/// Cheap Argon2 parameters so tests stay fast
pub const TEST_HASHING: HashingSettings = HashingSettings { memory_kib: 1024, iterations: 1 };

/// Creates an in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Returns (db, credential_store) over a fresh in-memory database
pub async fn setup_test_store() -> (DatabaseConnection, Arc<DbCredentialStore>) {
    let db = setup_test_db().await;
    let store = Arc::new(DbCredentialStore::new(db.clone()));
    (db, store)
}

pub fn test_password_hasher() -> Arc<PasswordHasher> {
    Arc::new(PasswordHasher::new(TEST_HASHING, None).expect("Failed to create test hasher"))
}

/// Returns (credential_store, auth_service) with the default registration policy
pub async fn setup_test_auth_service() -> (Arc<DbCredentialStore>, Arc<AuthService>) {
    setup_test_auth_service_with_policy(RegistrationPolicy::default()).await
}

pub async fn setup_test_auth_service_with_policy(
    policy: RegistrationPolicy,
) -> (Arc<DbCredentialStore>, Arc<AuthService>) {
    let (_db, store) = setup_test_store().await;
    let service = Arc::new(AuthService::new(store.clone(), test_password_hasher(), policy));
    (store, service)
}

/// A store whose backend is always unreachable
pub struct FailingCredentialStore;

fn unavailable(operation: &str) -> InternalError {
    InternalError::database(operation, DbErr::Conn(RuntimeErr::Internal("connection refused".to_string())))
}

#[async_trait::async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn find_by_username(&self, _username: &str) -> Result<UserRecord, InternalError> {
        Err(unavailable("find_by_username"))
    }

    async fn upsert(&self, _record: UserRecord) -> Result<UserRecord, InternalError> {
        Err(unavailable("upsert"))
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, InternalError> {
        Err(unavailable("list_users"))
    }
}
