// Common test utilities for integration tests

use siteuser_auth::config::{init_database, migrate_database, MockEnvironment, Settings};
use siteuser_auth::AppData;

/// Cheap hashing so tests stay fast; callers may add more variables
pub fn test_environment() -> MockEnvironment {
    MockEnvironment::empty()
        .with_var("DATABASE_URL", "sqlite::memory:")
        .with_var("HASH_MEMORY_KIB", "1024")
        .with_var("HASH_ITERATIONS", "1")
}

/// Builds AppData over a fresh, migrated in-memory database
pub async fn setup_app_data(env: MockEnvironment) -> AppData {
    let settings = Settings::from_env_provider(&env).expect("Failed to load test settings");

    let db = init_database(settings.database_url())
        .await
        .expect("Failed to create test database");
    migrate_database(&db).await.expect("Failed to run migrations");

    AppData::from_connection(db, &settings).expect("Failed to build AppData")
}
