use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::password;
use crate::store::{validate_new_user, CredentialStore, Role, StoreError, User};

/// In-memory credential store backing `AppState::fake()` and tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().expect("users lock poisoned");
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().expect("users lock poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, email: &str, password: &str, role: Role) -> Result<User, StoreError> {
        validate_new_user(email, password)?;
        let password_hash = password::hash_password(password).map_err(StoreError::Backend)?;

        let mut users = self.users.write().expect("users lock poisoned");
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash,
            role,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_find_roundtrip() {
        let store = MemoryCredentialStore::new();
        let created = store
            .create("staff@office.edu", "secret", Role::User)
            .await
            .expect("create");

        let by_email = store
            .find_by_email("staff@office.edu")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(by_email.id, created.id);

        let by_id = store
            .find_by_id(created.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(by_id.email, "staff@office.edu");
        assert_eq!(by_id.role, Role::User);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryCredentialStore::new();
        store
            .create("staff@office.edu", "secret", Role::User)
            .await
            .expect("create");
        let err = store
            .create("staff@office.edu", "other", Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn create_rejects_bad_input() {
        let store = MemoryCredentialStore::new();
        assert!(matches!(
            store.create("nope", "secret", Role::User).await.unwrap_err(),
            StoreError::InvalidEmail
        ));
        assert!(matches!(
            store
                .create("staff@office.edu", "", Role::User)
                .await
                .unwrap_err(),
            StoreError::EmptyPassword
        ));
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_plaintext() {
        let store = MemoryCredentialStore::new();
        let user = store
            .create("staff@office.edu", "secret", Role::User)
            .await
            .expect("create");
        assert_ne!(user.password_hash, "secret");
        assert!(user.password_hash.starts_with("$argon2"));
    }
}
