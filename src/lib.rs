pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notice;
pub mod ownership;
pub mod reorder;
pub mod views;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use config::Config;
use db::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub base_path: Arc<String>,
    pub session_ttl: time::Duration,
}

impl AppState {
    pub fn new(db: DbPool, config: &Config) -> Self {
        AppState {
            db,
            base_path: Arc::new(config.base_path.clone()),
            session_ttl: time::Duration::days(config.session_days),
        }
    }

    /// Prefixes an application path with the deployment base path.
    pub fn path(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    pub fn home(&self) -> String {
        if self.base_path.is_empty() {
            "/".to_string()
        } else {
            self.base_path.to_string()
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let base_path = state.base_path.clone();

    let app_routes = Router::new()
        .route("/", get(handlers::web::index))
        .route(
            "/login",
            get(handlers::web::login_page).post(handlers::auth::login),
        )
        .route(
            "/register",
            get(handlers::web::register_page).post(handlers::auth::register),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/add", post(handlers::tasks::add))
        .route("/edit/{id}", post(handlers::tasks::edit))
        .route("/toggle/{id}", get(handlers::tasks::toggle))
        .route("/delete/{id}", get(handlers::tasks::delete))
        .route("/reorder", post(handlers::tasks::reorder))
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(tower_http::compression::CompressionLayer::new()),
        )
        .with_state(state);

    tracing::info!("base_path: {base_path:?}");

    if base_path.is_empty() {
        app_routes
    } else {
        Router::new().nest(&*base_path, app_routes)
    }
}
