//! API request and response payloads.

use serde::{Deserialize, Serialize};
use trailhead_domain::User;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../mobile/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves traffic.
    pub status: &'static str,
}

/// Incoming payload for user creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../mobile/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Home city.
    pub city: Option<String>,
    /// Home state.
    pub state: Option<String>,
}

/// Incoming payload for a profile update. Missing fields stay unchanged.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../mobile/api-types/src/generated/update-user-request.ts"
)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New home city.
    pub city: Option<String>,
    /// New home state.
    pub state: Option<String>,
}

/// Query string for the email lookup route.
#[derive(Debug, Deserialize)]
pub struct EmailLookupQuery {
    /// Email to match exactly against stored users.
    pub email: String,
}

/// API representation of a user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../mobile/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Home city, if set.
    pub city: Option<String>,
    /// Home state, if set.
    pub state: Option<String>,
    /// Display names of followed users.
    pub friends: Vec<String>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
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
