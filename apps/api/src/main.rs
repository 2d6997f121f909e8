//! Trailhead API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod state;

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use mongodb::Client;
use mongodb::bson::doc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trailhead_application::UserService;
use trailhead_core::AppError;
use trailhead_infrastructure::MongoUserRepository;

use crate::api_config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let client = Client::with_uri_str(config.mongodb_uri.as_str())
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to mongodb: {error}")))?;
    let database = client.database(&config.mongodb_database);

    // Fail fast when the store is unreachable instead of on first request.
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|error| AppError::Internal(format!("mongodb ping failed: {error}")))?;

    let user_repository = Arc::new(MongoUserRepository::new(&database));
    user_repository.ensure_indexes().await?;

    let user_service = UserService::new(user_repository);

    if config.dev_seed {
        dev_seed::run(&user_service).await?;
    }

    let app_state = AppState { user_service };

    let cors_layer = CorsLayer::new()
        .allow_origin(HeaderValue::from_str(&config.frontend_url).map_err(|error| {
            AppError::Internal(format!("invalid FRONTEND_URL: {error}"))
        })?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/users/by-email",
            get(handlers::users::find_by_email_handler),
        )
        .route(
            "/users/{user_id}",
            get(handlers::users::get_user_handler)
                .put(handlers::users::update_user_handler)
                .delete(handlers::users::delete_user_handler),
        )
        .route(
            "/users/{user_id}/follow/{target_id}",
            post(handlers::users::follow_handler),
        )
        .route(
            "/users/{user_id}/unfollow/{target_id}",
            post(handlers::users::unfollow_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&config.api_host).map_err(|error| {
        AppError::Internal(format!("invalid API_HOST '{}': {error}", config.api_host))
    })?;
    let address = SocketAddr::from((host, config.api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "trailhead-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
