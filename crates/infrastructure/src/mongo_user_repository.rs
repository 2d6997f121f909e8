//! MongoDB-backed user repository.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use trailhead_application::UserRepository;
use trailhead_core::{AppError, AppResult, NonEmptyString};
use trailhead_domain::{EmailAddress, User, UserId};

/// Name of the backing collection.
const USERS_COLLECTION: &str = "users";

/// MongoDB implementation of the user repository port.
///
/// A thin wrapper around a collection handle; every method is one driver
/// call plus document mapping. Store failures propagate as `Internal`
/// errors carrying the driver's message, with a single mandated
/// exception: a duplicate-key write becomes `Conflict`.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Creates a repository over the `users` collection of `database`.
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }

    /// Creates the unique `email` index.
    ///
    /// The repository interface assumes at most one document per email;
    /// this index is what actually enforces it.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_index(email_index)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to create email index: {error}"))
            })?;

        tracing::info!(collection = USERS_COLLECTION, "unique email index ensured");
        Ok(())
    }
}

/// BSON shape of a stored user.
///
/// The id doubles as the document `_id`; timestamps are stored as RFC 3339
/// strings so the mapping stays independent of driver datetime features.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(default)]
    friends: Vec<String>,
    created_at: String,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
            city: user.city().map(str::to_owned),
            state: user.state().map(str::to_owned),
            friends: user.friends().to_vec(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = AppError;

    fn try_from(document: UserDocument) -> AppResult<Self> {
        let malformed =
            |detail: String| AppError::Internal(format!("malformed user document: {detail}"));

        let id = UserId::parse(&document.id)
            .map_err(|error| malformed(format!("bad id: {error}")))?;
        let name = NonEmptyString::new(document.name)
            .map_err(|error| malformed(format!("bad name: {error}")))?;
        let email = EmailAddress::new(document.email)
            .map_err(|error| malformed(format!("bad email: {error}")))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&document.created_at)
            .map(|parsed| parsed.with_timezone(&chrono::Utc))
            .map_err(|error| malformed(format!("bad created_at: {error}")))?;

        Ok(User::from_persistence(
            id,
            name,
            email,
            document.city,
            document.state,
            document.friends,
            created_at,
        ))
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(write_error))
            if write_error.code == 11000
    )
}

mod account;
mod lookup;

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &User) -> AppResult<()> {
        self.insert_impl(user).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        self.find_by_id_impl(user_id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_by_email_impl(email).await
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        self.list_all_impl().await
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        self.update_impl(user).await
    }

    async fn delete(&self, user_id: UserId) -> AppResult<()> {
        self.delete_impl(user_id).await
    }
}

#[cfg(test)]
mod tests;
