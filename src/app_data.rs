use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{init_database, migrate_database, Settings};
use crate::errors::InternalError;
use crate::services::{AuthService, PasswordHasher};
use crate::stores::{CredentialStore, DbCredentialStore};

/// Centralized application data
///
/// Created once in main.rs and shared by the API and CLI.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(settings)
///   ├─ credential_store (Arc<dyn CredentialStore>)
///   └─ auth_service (Arc<AuthService>)
/// ```
pub struct AppData {
    pub credential_store: Arc<dyn CredentialStore>,
    pub auth_service: Arc<AuthService>,
}

impl AppData {
    /// Connect, migrate and wire every component
    pub async fn init(settings: &Settings) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let db = init_database(settings.database_url()).await?;
        migrate_database(&db).await?;

        Self::from_connection(db, settings)
    }

    /// Wire components over an already migrated connection
    ///
    /// The store keeps its own handle to the pool.
    pub fn from_connection(db: DatabaseConnection, settings: &Settings) -> Result<Self, InternalError> {
        let credential_store: Arc<dyn CredentialStore> = Arc::new(DbCredentialStore::new(db.clone()));

        let password_hasher = Arc::new(PasswordHasher::new(
            settings.hashing(),
            settings.password_pepper().map(str::to_string),
        )?);

        let auth_service = Arc::new(AuthService::new(
            credential_store.clone(),
            password_hasher,
            settings.registration().clone(),
        ));

        tracing::info!("AppData initialization complete");

        Ok(Self {
            credential_store,
            auth_service,
        })
    }
}
