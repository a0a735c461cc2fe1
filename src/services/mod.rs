// Services layer - Business logic
pub mod auth_service;
pub mod password_hasher;

pub use auth_service::AuthService;
pub use password_hasher::PasswordHasher;
