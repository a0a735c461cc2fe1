use argon2::password_hash::{self, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version};
use rand_core::OsRng;

use crate::config::HashingSettings;
use crate::errors::InternalError;

/// Argon2id password hashing with a fresh random salt per hash
///
/// Hashes are PHC strings, so the salt and cost parameters travel with the hash and
/// verification keeps working after the configured cost changes. The optional pepper is
/// passed to Argon2 as its secret input and must stay the same for stored hashes to verify.
pub struct PasswordHasher {
    params: Params,
    pepper: Option<String>,
    placeholder_hash: String,
}

const PLACEHOLDER_PASSWORD: &str = "placeholder-password-never-stored";

impl PasswordHasher {
    pub fn new(settings: HashingSettings, pepper: Option<String>) -> Result<Self, InternalError> {
        let params = Params::new(settings.memory_kib, settings.iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| InternalError::crypto("argon2_params", e.to_string()))?;

        let mut hasher = Self {
            params,
            pepper,
            placeholder_hash: String::new(),
        };
        hasher.placeholder_hash = hasher.hash(PLACEHOLDER_PASSWORD)?;

        Ok(hasher)
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        match &self.pepper {
            Some(pepper) => Argon2::new_with_secret(
                pepper.as_bytes(),
                Algorithm::Argon2id,
                Version::V0x13,
                self.params.clone(),
            )
            .map_err(|e| InternalError::crypto("argon2_init", e.to_string())),
            None => Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())),
        }
    }

    /// Hash a plaintext password
    pub fn hash(&self, plaintext: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Check a plaintext password against a stored hash
    ///
    /// Uses Argon2's constant-time comparison. A stored hash that cannot be parsed
    /// never verifies.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, InternalError> {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return Ok(false);
            }
        };

        match self.argon2()?.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(InternalError::crypto("verify_password", e.to_string())),
        }
    }

    /// Run a full verification against a hash no user owns
    ///
    /// Lets a lookup miss cost the same as a wrong password, so response timing does
    /// not reveal whether a username exists.
    pub fn verify_placeholder(&self, plaintext: &str) -> Result<(), InternalError> {
        self.verify(plaintext, &self.placeholder_hash)?;
        Ok(())
    }
}
