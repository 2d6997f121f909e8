use futures::TryStreamExt;
use mongodb::bson::doc;

use trailhead_core::{AppError, AppResult};
use trailhead_domain::{User, UserId};

use super::{MongoUserRepository, UserDocument};

impl MongoUserRepository {
    /// The derived query: a hand-written `{email: <value>}` filter. The
    /// argument is matched exactly as given; any normalization happened
    /// upstream, if at all.
    pub(super) async fn find_by_email_impl(&self, email: &str) -> AppResult<Option<User>> {
        let document = self
            .collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to find user by email: {error}"))
            })?;

        document.map(User::try_from).transpose()
    }

    pub(super) async fn find_by_id_impl(&self, user_id: UserId) -> AppResult<Option<User>> {
        let document = self
            .collection
            .find_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(|error| AppError::Internal(format!("failed to find user by id: {error}")))?;

        document.map(User::try_from).transpose()
    }

    pub(super) async fn list_all_impl(&self) -> AppResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await.map_err(|error| {
            AppError::Internal(format!("failed to list users: {error}"))
        })?;

        let documents: Vec<UserDocument> = cursor.try_collect().await.map_err(|error| {
            AppError::Internal(format!("failed to read user cursor: {error}"))
        })?;

        let mut users = documents
            .into_iter()
            .map(User::try_from)
            .collect::<AppResult<Vec<User>>>()?;
        users.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(users)
    }
}
