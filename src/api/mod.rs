use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod error;
mod observability;
mod system;
mod todolists;
mod todos;
pub mod types;
mod users;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn todo_service(&self) -> &Arc<dyn crate::services::TodoService> {
        &self.shared.todo_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    // Credentials rule out a literal `*`, so "any origin" mirrors the caller.
    let allow_origin = if cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        AllowOrigin::list(origins)
    };
    let cors_layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true);

    // Trailing-slash variants are what the desktop client posts to; bodies
    // are bare JSON for the same reason.
    Router::new()
        .route("/_ping", get(system::ping))
        .route("/users", post(users::create_user))
        .route("/users/", post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        .route("/todolists", post(todolists::create_todolist))
        .route("/todolists/", post(todolists::create_todolist))
        .route("/todolists/{id}", get(todolists::get_todolist))
        .route(
            "/todolists/slug/{slug}",
            get(todolists::get_todolist_by_slug),
        )
        .route("/todos", post(todos::create_todo))
        .route("/todos/", post(todos::create_todo))
        .route("/todos/update", post(todos::update_todo_column))
        .route("/todos/{id}", put(todos::move_todo).delete(todos::delete_todo))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(
            cors_layer
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
