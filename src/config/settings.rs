use std::fmt;
use std::str::FromStr;

use crate::config::{EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://site_users.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

// Argon2id defaults, roughly 20-50ms per hash on commodity hardware
const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;
const DEFAULT_HASH_ITERATIONS: u32 = 2;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Setting '{setting_name}' has invalid format. Expected: {expected}, got: {actual}")]
    InvalidFormat {
        setting_name: String,
        expected: String,
        actual: String,
    },

    #[error("Setting '{setting_name}' must not be empty")]
    Empty { setting_name: String },
}

/// What registration does when the username is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateUsernamePolicy {
    /// Fail with a duplicate-username error
    #[default]
    Reject,
    /// Overwrite the existing record in place, keeping its id
    Overwrite,
}

impl FromStr for DuplicateUsernamePolicy {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(SettingsError::InvalidFormat {
                setting_name: "DUPLICATE_USERNAME_POLICY".to_string(),
                expected: "reject | overwrite".to_string(),
                actual: other.to_string(),
            }),
        }
    }
}

/// Policy points applied by registration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationPolicy {
    /// Roles attached to every newly registered user
    pub default_roles: Vec<String>,
    pub duplicate_username: DuplicateUsernamePolicy,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingSettings {
    pub memory_kib: u32,
    pub iterations: u32,
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
        }
    }
}

/// Application settings loaded from the environment
pub struct Settings {
    database_url: String,
    server_host: String,
    server_port: u16,
    password_pepper: Option<String>,
    hashing: HashingSettings,
    registration: RegistrationPolicy,
}

impl Settings {
    /// Load settings from the given environment provider, applying defaults for unset values
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, SettingsError> {
        let database_url = env
            .get_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        if database_url.trim().is_empty() {
            return Err(SettingsError::Empty { setting_name: "DATABASE_URL".to_string() });
        }

        let server_host = env.get_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let server_port = parse_or(env, "PORT", DEFAULT_PORT, "port number (1-65535)")?;
        if server_port == 0 {
            return Err(SettingsError::InvalidFormat {
                setting_name: "PORT".to_string(),
                expected: "port number (1-65535)".to_string(),
                actual: "0".to_string(),
            });
        }

        let password_pepper = env.get_var("PASSWORD_PEPPER").filter(|p| !p.is_empty());

        let hashing = HashingSettings {
            memory_kib: parse_or(env, "HASH_MEMORY_KIB", DEFAULT_HASH_MEMORY_KIB, "positive integer")?,
            iterations: parse_or(env, "HASH_ITERATIONS", DEFAULT_HASH_ITERATIONS, "positive integer")?,
        };

        let default_roles = env
            .get_var("DEFAULT_ROLES")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let duplicate_username = match env.get_var("DUPLICATE_USERNAME_POLICY") {
            Some(raw) => raw.parse()?,
            None => DuplicateUsernamePolicy::default(),
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            password_pepper,
            hashing,
            registration: RegistrationPolicy {
                default_roles,
                duplicate_username,
            },
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn password_pepper(&self) -> Option<&str> {
        self.password_pepper.as_deref()
    }

    pub fn hashing(&self) -> HashingSettings {
        self.hashing
    }

    pub fn registration(&self) -> &RegistrationPolicy {
        &self.registration
    }
}

fn parse_or<T: FromStr>(
    env: &dyn EnvironmentProvider,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, SettingsError> {
    match env.get_var(key) {
        Some(raw) => raw.trim().parse().map_err(|_| SettingsError::InvalidFormat {
            setting_name: key.to_string(),
            expected: expected.to_string(),
            actual: raw,
        }),
        None => Ok(default),
    }
}

// Keeps the pepper out of logs
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[redacted]"))
            .field("hashing", &self.hashing)
            .field("registration", &self.registration)
            .finish()
    }
}
