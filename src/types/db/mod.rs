// Database entities - SeaORM models
pub mod site_user;
pub mod user_role;
