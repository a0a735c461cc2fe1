use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};

use crate::errors::internal::{CredentialError, InternalError};
use crate::types::db::{site_user, user_role};
use crate::types::internal::UserRecord;

/// Persistence for user records and their roles
///
/// Implementations hold no business rules. Lookups are exact and case-sensitive.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch a user and its full role set
    ///
    /// # Errors
    /// * `CredentialError::UnknownUser` - no record has this username
    /// * `InternalError::Database` - the store is unavailable
    async fn find_by_username(&self, username: &str) -> Result<UserRecord, InternalError>;

    /// Insert the record when it has no id, otherwise overwrite it completely
    ///
    /// The role set is replaced wholesale. Either the whole record image lands or none of it.
    /// Returns the record as persisted, with ids assigned.
    async fn upsert(&self, record: UserRecord) -> Result<UserRecord, InternalError>;

    /// Every user with roles, in no particular order
    async fn list_all(&self) -> Result<Vec<UserRecord>, InternalError>;
}

/// CredentialStore backed by the `site_users` and `user_roles` tables
pub struct DbCredentialStore {
    db: DatabaseConnection,
}

impl DbCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique index violations surface as duplicate usernames; anything else is a store failure
fn map_user_write_error(operation: &str, username: &str, e: DbErr) -> InternalError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            CredentialError::DuplicateUsername(username.to_string()).into()
        }
        _ => InternalError::database(operation, e),
    }
}

#[async_trait::async_trait]
impl CredentialStore for DbCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<UserRecord, InternalError> {
        let user = site_user::Entity::find()
            .filter(site_user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_username", e))?
            .ok_or_else(|| CredentialError::UnknownUser(username.to_string()))?;

        // Roles are always loaded with the user
        let roles = user
            .find_related(user_role::Entity)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_roles_for_user", e))?;

        Ok(UserRecord::from_models(user, roles))
    }

    async fn upsert(&self, record: UserRecord) -> Result<UserRecord, InternalError> {
        // Dropping the transaction on any early return rolls it back
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let now = Utc::now().timestamp();
        let existing = match record.id {
            Some(id) => site_user::Entity::find_by_id(id)
                .one(&txn)
                .await
                .map_err(|e| InternalError::database("find_user_for_upsert", e))?,
            None => None,
        };

        let mut active = site_user::ActiveModel {
            id: record.id.map(Set).unwrap_or(NotSet),
            username: Set(record.username.clone()),
            password_hash: Set(record.password_hash.clone()),
            enabled: Set(record.enabled),
            account_non_expired: Set(record.account_non_expired),
            credentials_non_expired: Set(record.credentials_non_expired),
            account_non_locked: Set(record.account_non_locked),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let user = if existing.is_some() {
            active.created_at = NotSet;
            active
                .update(&txn)
                .await
                .map_err(|e| map_user_write_error("update_user", &record.username, e))?
        } else {
            active
                .insert(&txn)
                .await
                .map_err(|e| map_user_write_error("insert_user", &record.username, e))?
        };

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user.id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("clear_user_roles", e))?;

        let mut roles = Vec::with_capacity(record.roles.len());
        for role in &record.roles {
            let inserted = user_role::ActiveModel {
                id: NotSet,
                user_id: Set(user.id),
                role: Set(role.role.clone()),
            }
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("insert_user_role", e))?;
            roles.push(inserted);
        }

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::debug!(user_id = user.id, username = %user.username, roles = roles.len(), "User record saved");

        Ok(UserRecord::from_models(user, roles))
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, InternalError> {
        let users = site_user::Entity::find()
            .find_with_related(user_role::Entity)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))?;

        Ok(users
            .into_iter()
            .map(|(user, roles)| UserRecord::from_models(user, roles))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_store;
    use crate::types::internal::RoleRecord;

    fn record_with_roles(username: &str, roles: &[&str]) -> UserRecord {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        UserRecord::new(username, "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA", &roles)
    }

    #[tokio::test]
    async fn test_upsert_new_record_assigns_ids() {
        let (_db, store) = setup_test_store().await;

        let saved = store.upsert(record_with_roles("alice", &["USER"])).await.unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.roles.len(), 1);
        assert!(saved.roles[0].id.is_some());
        assert_eq!(saved.roles[0].role, "USER");
    }

    #[tokio::test]
    async fn test_find_by_username_loads_roles() {
        let (_db, store) = setup_test_store().await;
        store.upsert(record_with_roles("alice", &["ADMIN", "USER"])).await.unwrap();

        let found = store.find_by_username("alice").await.unwrap();

        let mut roles = found.role_names();
        roles.sort();
        assert_eq!(roles, vec!["ADMIN", "USER"]);
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn test_find_by_username_is_case_sensitive() {
        let (_db, store) = setup_test_store().await;
        store.upsert(record_with_roles("alice", &[])).await.unwrap();

        let result = store.find_by_username("Alice").await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::UnknownUser(ref name))) if name == "Alice"
        ));
    }

    #[tokio::test]
    async fn test_find_unknown_user_fails_distinguishably() {
        let (_db, store) = setup_test_store().await;

        let err = store.find_by_username("nobody").await.unwrap_err();

        assert_eq!(err.credential(), Some(&CredentialError::UnknownUser("nobody".to_string())));
        assert!(!err.is_store_unavailable());
    }

    #[tokio::test]
    async fn test_upsert_existing_record_overwrites_everything() {
        let (_db, store) = setup_test_store().await;
        let saved = store.upsert(record_with_roles("alice", &["USER", "EDITOR"])).await.unwrap();

        let mut changed = saved.clone();
        changed.password_hash = "$argon2id$v=19$m=1024,t=1,p=1$bmV3$bmV3".to_string();
        changed.account_non_locked = false;
        changed.roles = vec![RoleRecord::new("ADMIN")];
        let updated = store.upsert(changed).await.unwrap();

        assert_eq!(updated.id, saved.id);
        let found = store.find_by_username("alice").await.unwrap();
        assert_eq!(found.password_hash, "$argon2id$v=19$m=1024,t=1,p=1$bmV3$bmV3");
        assert!(!found.account_non_locked);
        assert_eq!(found.role_names(), vec!["ADMIN"]);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_with_unknown_id_inserts() {
        let (_db, store) = setup_test_store().await;
        let mut record = record_with_roles("alice", &[]);
        record.id = Some(42);

        let saved = store.upsert(record).await.unwrap();

        assert_eq!(saved.id, Some(42));
        assert_eq!(store.find_by_username("alice").await.unwrap().id, Some(42));
    }

    #[tokio::test]
    async fn test_inserting_duplicate_username_is_rejected() {
        let (_db, store) = setup_test_store().await;
        store.upsert(record_with_roles("alice", &[])).await.unwrap();

        let err = store.upsert(record_with_roles("alice", &[])).await.unwrap_err();

        assert_eq!(err.credential(), Some(&CredentialError::DuplicateUsername("alice".to_string())));
    }

    #[tokio::test]
    async fn test_failed_upsert_leaves_previous_image_intact() {
        let (_db, store) = setup_test_store().await;
        let alice = store.upsert(record_with_roles("alice", &["USER"])).await.unwrap();
        store.upsert(record_with_roles("bob", &[])).await.unwrap();

        // Renaming alice onto bob violates the unique index mid-transaction
        let mut clash = alice.clone();
        clash.username = "bob".to_string();
        clash.roles = vec![RoleRecord::new("ADMIN")];
        assert!(store.upsert(clash).await.is_err());

        let found = store.find_by_username("alice").await.unwrap();
        assert_eq!(found.id, alice.id);
        assert_eq!(found.role_names(), vec!["USER"]);
    }

    #[tokio::test]
    async fn test_list_all_returns_every_record_with_roles() {
        let (_db, store) = setup_test_store().await;
        store.upsert(record_with_roles("alice", &["ADMIN", "USER"])).await.unwrap();
        store.upsert(record_with_roles("bob", &[])).await.unwrap();
        store.upsert(record_with_roles("carol", &["USER"])).await.unwrap();

        let mut users = store.list_all().await.unwrap();
        users.sort_by(|a, b| a.username.cmp(&b.username));

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].roles.len(), 2);
        assert!(users[1].roles.is_empty());
        assert_eq!(users[2].role_names(), vec!["USER"]);
    }

    #[tokio::test]
    async fn test_closed_database_reports_store_unavailable() {
        let (db, store) = setup_test_store().await;
        db.close().await.unwrap();

        let err = store.find_by_username("alice").await.unwrap_err();

        assert!(err.is_store_unavailable());
    }
}
