//! Environment-driven API configuration.

use std::env;

use trailhead_core::AppError;
use url::Url;

/// Runtime configuration for the API binary.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// MongoDB connection string.
    pub mongodb_uri: String,
    /// Database holding the `users` collection.
    pub mongodb_database: String,
    /// Interface the listener binds to.
    pub api_host: String,
    /// Port the listener binds to.
    pub api_port: u16,
    /// Origin allowed by CORS (the mobile client's web build).
    pub frontend_url: String,
    /// Whether to seed sample users at startup.
    pub dev_seed: bool,
}

impl ApiConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, AppError> {
        let mongodb_uri = required_env("MONGODB_URI")?;
        let mongodb_database =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| "trailhead".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        Url::parse(&frontend_url)
            .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?;

        let dev_seed = env::var("DEV_SEED")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            mongodb_uri,
            mongodb_database,
            api_host,
            api_port,
            frontend_url,
            dev_seed,
        })
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
