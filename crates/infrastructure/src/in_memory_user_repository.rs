//! In-memory user repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use trailhead_application::UserRepository;
use trailhead_core::{AppError, AppResult};
use trailhead_domain::{User, UserId};

/// In-memory implementation of the user repository port.
///
/// Enforces the same unique-email rule as the document store's index, so
/// tests and driverless development observe the same contract.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(AppError::Conflict(format!(
                "email '{}' is already registered",
                user.email().as_str()
            )));
        }

        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.email().as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;

        let mut values: Vec<User> = users.values().cloned().collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id()) {
            return Err(AppError::NotFound(format!(
                "user '{}' does not exist",
                user.id()
            )));
        }

        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.remove(&user_id).is_none() {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' does not exist"
            )));
        }

        Ok(())
    }
}
