mod database;
mod env_provider;
mod logging;
mod settings;

pub use database::{init_database, migrate_database};
pub use env_provider::{EnvironmentProvider, MockEnvironment, SystemEnvironment};
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use settings::{DuplicateUsernamePolicy, HashingSettings, RegistrationPolicy, Settings, SettingsError};
