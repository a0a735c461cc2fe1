use std::collections::BTreeSet;

use super::user_record::UserRecord;

/// An authenticated user and the authorities granted through its roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub username: String,
    pub authorities: BTreeSet<String>,
}

impl AuthenticatedIdentity {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}

impl From<&UserRecord> for AuthenticatedIdentity {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            authorities: record.roles.iter().map(|r| r.role.clone()).collect(),
        }
    }
}
