// Internal domain types shared by stores and services
pub mod identity;
pub mod user_record;

pub use identity::AuthenticatedIdentity;
pub use user_record::{RoleRecord, UserRecord};
