use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::{CatalogStore, Store};
use crate::services::{
    BeatService, DefaultBeatService, DefaultLikeService, DefaultUserService, LikeService,
    UserService,
};

mod beats;
mod error;
mod likes;
mod observability;
mod system;
mod types;
mod users;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub users: Arc<dyn UserService>,

    pub beats: Arc<dyn BeatService>,

    pub likes: Arc<dyn LikeService>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

/// Wire the services over `store`.
#[must_use]
pub fn create_app_state(
    config: Config,
    store: Store,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let catalog: Arc<dyn CatalogStore> = Arc::new(store.clone());

    Arc::new(AppState {
        users: Arc::new(DefaultUserService::new(
            catalog.clone(),
            config.security.clone(),
        )),
        beats: Arc::new(DefaultBeatService::new(catalog.clone())),
        likes: Arc::new(DefaultLikeService::new(catalog)),
        config: Arc::new(config),
        store,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .post(users::update_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/by-username/{username}",
            get(users::get_user_by_username),
        )
        .route("/users/{id}/beats", get(users::list_creator_beats))
        .route("/users/{id}/likes", get(users::list_user_likes))
        .route("/beats", get(beats::list_beats).post(beats::create_beat))
        .route(
            "/beats/{id}",
            get(beats::get_beat)
                .post(beats::update_beat)
                .put(beats::update_beat)
                .delete(beats::delete_beat),
        )
        .route("/beats/{id}/likes", get(beats::list_beat_likes))
        .route("/likes", post(likes::create_like))
        .route(
            "/likes/{user_id}/{beat_id}",
            get(likes::get_like).delete(likes::delete_like),
        )
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_metrics))
}
