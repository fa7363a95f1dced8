use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::userdb::errors::UserError;
use crate::userdb::types::{User, UserLookupResult};
use crate::username::UserName;

use super::{UserDirectory, normalize_user};

/// User directory held in process memory, keyed by username.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory user directory");
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_user_name(&self, user_name: &UserName) -> Result<UserLookupResult, UserError> {
        let users = self.users.read().await;
        Ok(users.get(user_name.as_str()).cloned().into())
    }

    async fn upsert_user(&self, user: User) -> Result<User, UserError> {
        let user = normalize_user(user)?;
        let mut users = self.users.write().await;
        // A renamed user must not stay reachable under the old name
        users.retain(|_, existing| existing.id != user.id);
        users.insert(user.user_name.clone(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::userdb::types::Authenticator;

    fn name(raw: &str) -> UserName {
        UserName::clean(raw).unwrap()
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let directory = InMemoryUserDirectory::new();
        let result = directory.find_by_user_name(&name("ghost")).await.unwrap();
        assert_eq!(result, UserLookupResult::NotFound);
    }

    #[tokio::test]
    async fn test_upsert_normalizes_user_name() {
        // Given a user stored with a mixed-case, padded name
        let directory = InMemoryUserDirectory::new();
        let stored = directory
            .upsert_user(User::new("u1", " Alice "))
            .await
            .unwrap();

        // Then it is stored and found under the normalized name
        assert_eq!(stored.user_name, "alice");
        let found = directory
            .find_by_user_name(&name("alice"))
            .await
            .unwrap()
            .found()
            .unwrap();
        assert_eq!(found.id, "u1");
    }

    #[tokio::test]
    async fn test_upsert_rejects_invalid_user_name() {
        let directory = InMemoryUserDirectory::new();

        let result = directory.upsert_user(User::new("u1", "not valid")).await;

        assert!(matches!(result, Err(UserError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_upsert_then_find() {
        let directory = InMemoryUserDirectory::new();
        let user = User::new("u1", "alice").with_authenticators(vec![
            Authenticator::public_key("cred-a"),
            Authenticator::public_key("cred-b"),
        ]);

        directory.upsert_user(user.clone()).await.unwrap();

        let result = directory.find_by_user_name(&name("alice")).await.unwrap();
        assert_eq!(result, UserLookupResult::Found(user));
    }

    #[tokio::test]
    async fn test_upsert_rename_drops_old_name() {
        let directory = InMemoryUserDirectory::new();
        directory
            .upsert_user(User::new("u1", "alice"))
            .await
            .unwrap();
        directory
            .upsert_user(User::new("u1", "alicia"))
            .await
            .unwrap();

        assert_eq!(
            directory.find_by_user_name(&name("alice")).await.unwrap(),
            UserLookupResult::NotFound
        );
        assert!(matches!(
            directory.find_by_user_name(&name("alicia")).await.unwrap(),
            UserLookupResult::Found(_)
        ));
    }
}
