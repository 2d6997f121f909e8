//! Shared application state.

use trailhead_application::UserService;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The user directory service.
    pub user_service: UserService,
}
