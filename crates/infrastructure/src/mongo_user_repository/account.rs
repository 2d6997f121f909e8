use mongodb::bson::doc;

use trailhead_core::{AppError, AppResult};
use trailhead_domain::{User, UserId};

use super::{MongoUserRepository, UserDocument, is_duplicate_key};

impl MongoUserRepository {
    pub(super) async fn insert_impl(&self, user: &User) -> AppResult<()> {
        let document = UserDocument::from(user);

        self.collection.insert_one(document).await.map_err(|error| {
            if is_duplicate_key(&error) {
                AppError::Conflict(format!(
                    "email '{}' is already registered",
                    user.email().as_str()
                ))
            } else {
                AppError::Internal(format!("failed to insert user: {error}"))
            }
        })?;

        Ok(())
    }

    pub(super) async fn update_impl(&self, user: &User) -> AppResult<()> {
        let document = UserDocument::from(user);

        let result = self
            .collection
            .replace_one(doc! { "_id": document.id.as_str() }, &document)
            .await
            .map_err(|error| AppError::Internal(format!("failed to update user: {error}")))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "user '{}' does not exist",
                user.id()
            )));
        }

        Ok(())
    }

    pub(super) async fn delete_impl(&self, user_id: UserId) -> AppResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' does not exist"
            )));
        }

        Ok(())
    }
}
