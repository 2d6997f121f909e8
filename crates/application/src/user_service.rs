//! User directory ports and application service.
//!
//! Owns the user lifecycle: registration, lookup, profile updates,
//! the follow graph, and removal. All persistence goes through the
//! [`UserRepository`] port; this layer adds no retries or caching on top
//! of what the store adapter reports.

use std::sync::Arc;

use async_trait::async_trait;

use trailhead_core::{AppError, AppResult, NonEmptyString};
use trailhead_domain::{EmailAddress, User, UserId};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Repository port for user persistence.
///
/// Every method is a direct delegation to the backing store. Absence of a
/// match is `Ok(None)`, never an error; store failures surface through the
/// `AppError` taxonomy unchanged in content.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. Fails with `Conflict` when the email is taken.
    async fn insert(&self, user: &User) -> AppResult<()>;

    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;

    /// Finds the single user whose stored email equals `email` exactly.
    ///
    /// No normalization or case-folding happens here; the argument is
    /// matched byte-for-byte against the stored value.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Lists every user in the collection.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Replaces the stored record for the user's id. `NotFound` if absent.
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Deletes the user with the given id. `NotFound` if absent.
    async fn delete(&self, user_id: UserId) -> AppResult<()>;
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Parameters for user registration.
#[derive(Debug, Clone)]
pub struct RegisterUserParams {
    /// Display name for the new account.
    pub name: String,
    /// Email address for the new account.
    pub email: String,
    /// Home city, if provided.
    pub city: Option<String>,
    /// Home state, if provided.
    pub state: Option<String>,
}

/// Parameters for a profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    /// New display name.
    pub name: Option<String>,
    /// New home city.
    pub city: Option<String>,
    /// New home state.
    pub state: Option<String>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for the user directory.
///
/// Stateless request/response facade over the repository port.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Registers a new community member.
    ///
    /// Validates the name and email, rejects an already-registered email
    /// with `Conflict`, and returns the stored user.
    pub async fn register(&self, params: RegisterUserParams) -> AppResult<User> {
        let name = NonEmptyString::new(params.name)?;
        let email = EmailAddress::new(params.email)?;

        let existing = self.user_repository.find_by_email(email.as_str()).await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "a user with this email already exists".to_owned(),
            ));
        }

        let user = User::new(name, email, params.city, params.state);
        self.user_repository.insert(&user).await?;

        Ok(user)
    }

    /// Returns a user by id, if present.
    pub async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        self.user_repository.find_by_id(user_id).await
    }

    /// Returns the user whose stored email exactly equals `email`.
    ///
    /// The argument is forwarded to the store as-is: no validation,
    /// normalization, or case-folding at this layer.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_repository.find_by_email(email).await
    }

    /// Lists every registered user.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repository.list_all().await
    }

    /// Applies a partial profile update and returns the stored user.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        params: UpdateProfileParams,
    ) -> AppResult<User> {
        let mut user = self.require_user(user_id).await?;

        if let Some(name) = params.name {
            user.rename(NonEmptyString::new(name)?);
        }
        if params.city.is_some() || params.state.is_some() {
            let city = params.city.or_else(|| user.city().map(str::to_owned));
            let state = params.state.or_else(|| user.state().map(str::to_owned));
            user.relocate(city, state);
        }

        self.user_repository.update(&user).await?;
        Ok(user)
    }

    /// Records that `follower_id` follows `target_id`.
    ///
    /// Resolves the target's display name into the follower's friends
    /// list. Following yourself is rejected; repeating a follow is a
    /// no-op. Returns the updated follower.
    pub async fn follow(&self, follower_id: UserId, target_id: UserId) -> AppResult<User> {
        if follower_id == target_id {
            return Err(AppError::Validation(
                "users cannot follow themselves".to_owned(),
            ));
        }

        let mut follower = self.require_user(follower_id).await?;
        let target = self.require_user(target_id).await?;

        follower.add_friend(target.name());
        self.user_repository.update(&follower).await?;

        Ok(follower)
    }

    /// Removes `target_id` from `follower_id`'s follow list.
    ///
    /// Unfollowing someone who was never followed is a no-op. Returns the
    /// updated follower.
    pub async fn unfollow(&self, follower_id: UserId, target_id: UserId) -> AppResult<User> {
        let mut follower = self.require_user(follower_id).await?;
        let target = self.require_user(target_id).await?;

        follower.remove_friend(target.name());
        self.user_repository.update(&follower).await?;

        Ok(follower)
    }

    /// Deletes a user by id.
    pub async fn remove(&self, user_id: UserId) -> AppResult<()> {
        self.user_repository.delete(user_id).await
    }

    async fn require_user(&self, user_id: UserId) -> AppResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }
}
