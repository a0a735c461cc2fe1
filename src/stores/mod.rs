// Stores layer - Data access and repository pattern
pub mod credential_store;

pub use credential_store::{CredentialStore, DbCredentialStore};
