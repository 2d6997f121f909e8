//! Idempotent sample users for local development.

use trailhead_application::{RegisterUserParams, UserService};
use trailhead_core::{AppError, AppResult};
use tracing::info;

const SEED_USERS: &[(&str, &str, &str, &str)] = &[
    ("Alice Trailwalker", "alice@trailhead.local", "Boulder", "CO"),
    ("Bob Summit", "bob@trailhead.local", "Denver", "CO"),
    ("Cara Ridgeline", "cara@trailhead.local", "Moab", "UT"),
];

/// Registers the sample users, skipping any that already exist.
pub async fn run(user_service: &UserService) -> AppResult<()> {
    for (name, email, city, state) in SEED_USERS {
        let params = RegisterUserParams {
            name: (*name).to_owned(),
            email: (*email).to_owned(),
            city: Some((*city).to_owned()),
            state: Some((*state).to_owned()),
        };

        match user_service.register(params).await {
            Ok(user) => info!(email, id = %user.id(), "seeded dev user"),
            Err(AppError::Conflict(_)) => {}
            Err(error) => return Err(error),
        }
    }

    Ok(())
}
