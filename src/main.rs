use std::net::Ipv4Addr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ticklist::{config::Config, create_app, db, AppState};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env().expect("valid TICKLIST_* configuration");

    let db = db::init_db(&config.database_path).expect("initializing database");
    match db::cleanup_expired_sessions(&db) {
        Ok(removed) => info!(removed, "Removed expired sessions"),
        Err(err) => tracing::warn!(?err, "Failed to remove expired sessions"),
    }

    let state = AppState::new(db, &config);
    let app = create_app(state);
    let addr = (Ipv4Addr::UNSPECIFIED, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("binding listener");

    info!(database = %config.database_path.display(), "running on {addr:?}");

    axum::serve(listener, app).await.expect("failed serving");
}
