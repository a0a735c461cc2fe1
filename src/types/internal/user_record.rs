use crate::types::db::{site_user, user_role};

/// A stored user together with its full role set
///
/// `id` is `None` until the record has been persisted; the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Option<i32>,
    pub username: String,
    /// PHC-formatted Argon2 hash, never the plaintext
    pub password_hash: String,
    pub enabled: bool,
    pub account_non_expired: bool,
    pub credentials_non_expired: bool,
    pub account_non_locked: bool,
    pub roles: Vec<RoleRecord>,
}

/// A single role granted to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    pub id: Option<i32>,
    /// Free text, passed through verbatim as an authority
    pub role: String,
}

impl UserRecord {
    /// Build an unsaved record with every status flag set and the given roles
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, roles: &[String]) -> Self {
        Self {
            id: None,
            username: username.into(),
            password_hash: password_hash.into(),
            enabled: true,
            account_non_expired: true,
            credentials_non_expired: true,
            account_non_locked: true,
            roles: roles.iter().map(|r| RoleRecord::new(r.clone())).collect(),
        }
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.role.as_str()).collect()
    }

    pub(crate) fn from_models(user: site_user::Model, roles: Vec<user_role::Model>) -> Self {
        Self {
            id: Some(user.id),
            username: user.username,
            password_hash: user.password_hash,
            enabled: user.enabled,
            account_non_expired: user.account_non_expired,
            credentials_non_expired: user.credentials_non_expired,
            account_non_locked: user.account_non_locked,
            roles: roles.into_iter().map(RoleRecord::from).collect(),
        }
    }
}

impl RoleRecord {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            id: None,
            role: role.into(),
        }
    }
}

impl From<user_role::Model> for RoleRecord {
    fn from(model: user_role::Model) -> Self {
        Self {
            id: Some(model.id),
            role: model.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults_all_flags_true() {
        let record = UserRecord::new("alice", "$argon2id$hash", &[]);

        assert_eq!(record.id, None);
        assert!(record.enabled);
        assert!(record.account_non_expired);
        assert!(record.credentials_non_expired);
        assert!(record.account_non_locked);
        assert!(record.roles.is_empty());
    }

    #[test]
    fn test_new_record_carries_given_roles() {
        let roles = vec!["USER".to_string(), "ADMIN".to_string()];
        let record = UserRecord::new("bob", "$argon2id$hash", &roles);

        assert_eq!(record.role_names(), vec!["USER", "ADMIN"]);
        assert!(record.roles.iter().all(|r| r.id.is_none()));
    }

    #[test]
    fn test_from_models_maps_every_column() {
        let user = site_user::Model {
            id: 7,
            username: "carol".to_string(),
            password_hash: "hash".to_string(),
            enabled: false,
            account_non_expired: true,
            credentials_non_expired: false,
            account_non_locked: true,
            created_at: 0,
            updated_at: 0,
        };
        let roles = vec![user_role::Model { id: 3, user_id: 7, role: "USER".to_string() }];

        let record = UserRecord::from_models(user, roles);

        assert_eq!(record.id, Some(7));
        assert_eq!(record.username, "carol");
        assert!(!record.enabled);
        assert!(!record.credentials_non_expired);
        assert_eq!(record.roles, vec![RoleRecord { id: Some(3), role: "USER".to_string() }]);
    }
}
