//! User directory routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use trailhead_application::{RegisterUserParams, UpdateProfileParams};
use trailhead_core::AppError;
use trailhead_domain::UserId;

use crate::dto::{CreateUserRequest, EmailLookupQuery, UpdateUserRequest, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Lists every registered user.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Registers a new user.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .register(RegisterUserParams {
            name: request.name,
            email: request.email,
            city: request.city,
            state: request.state,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Looks up the single user whose stored email equals the query exactly.
pub async fn find_by_email_handler(
    State(state): State<AppState>,
    Query(query): Query<EmailLookupQuery>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .find_by_email(query.email.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no user with email '{}'", query.email)))?;

    Ok(Json(UserResponse::from(user)))
}

/// Fetches a user by id.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::parse(&user_id)?;
    let user = state
        .user_service
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

    Ok(Json(UserResponse::from(user)))
}

/// Applies a partial profile update.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::parse(&user_id)?;
    let user = state
        .user_service
        .update_profile(
            user_id,
            UpdateProfileParams {
                name: request.name,
                city: request.city,
                state: request.state,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Deletes a user.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    let user_id = UserId::parse(&user_id)?;
    state.user_service.remove(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Records a follow and returns the updated follower.
pub async fn follow_handler(
    State(state): State<AppState>,
    Path((user_id, target_id)): Path<(String, String)>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::parse(&user_id)?;
    let target_id = UserId::parse(&target_id)?;

    let follower = state.user_service.follow(user_id, target_id).await?;
    Ok(Json(UserResponse::from(follower)))
}

/// Removes a follow and returns the updated follower.
pub async fn unfollow_handler(
    State(state): State<AppState>,
    Path((user_id, target_id)): Path<(String, String)>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::parse(&user_id)?;
    let target_id = UserId::parse(&target_id)?;

    let follower = state.user_service.unfollow(user_id, target_id).await?;
    Ok(Json(UserResponse::from(follower)))
}
