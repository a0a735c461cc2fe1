// API request and response models
pub mod auth;
pub mod common;
pub mod user;
