//! User entity and validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trailhead_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a user identifier from its string form.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid user id '{value}': {error}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    /// The stored form is trimmed and lowercased.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
        if parts.len() != 2 {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        let local = parts[0];
        let domain = parts[1];

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// A member of the trail community.
///
/// `friends` holds the display names of the users this user follows; the
/// mobile feed filters on names, so follow operations resolve ids to names
/// before recording them here.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: NonEmptyString,
    email: EmailAddress,
    city: Option<String>,
    state: Option<String>,
    friends: Vec<String>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh identifier and creation timestamp.
    #[must_use]
    pub fn new(
        name: NonEmptyString,
        email: EmailAddress,
        city: Option<String>,
        state: Option<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            city,
            state,
            friends: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Rehydrates a user from stored state.
    #[must_use]
    pub fn from_persistence(
        id: UserId,
        name: NonEmptyString,
        email: EmailAddress,
        city: Option<String>,
        state: Option<String>,
        friends: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            city,
            state,
            friends,
            created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the canonical email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the home city, if set.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Returns the home state, if set.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Returns the display names of followed users.
    #[must_use]
    pub fn friends(&self) -> &[String] {
        &self.friends
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the display name.
    pub fn rename(&mut self, name: NonEmptyString) {
        self.name = name;
    }

    /// Replaces the home location.
    pub fn relocate(&mut self, city: Option<String>, state: Option<String>) {
        self.city = city;
        self.state = state;
    }

    /// Records a followed user's display name. Repeated follows are no-ops.
    pub fn add_friend(&mut self, name: &str) {
        if !self.friends.iter().any(|existing| existing == name) {
            self.friends.push(name.to_owned());
        }
    }

    /// Removes a followed user's display name. Unknown names are no-ops.
    pub fn remove_friend(&mut self, name: &str) {
        self.friends.retain(|existing| existing != name);
    }
}
