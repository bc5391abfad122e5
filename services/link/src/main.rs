use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use craftlink_auth_types::session::SessionSecret;
use craftlink_core::tracing::init_tracing;
use craftlink_link::config::LinkConfig;
use craftlink_link::infra::events::BroadcastEventSink;
use craftlink_link::infra::memory::MemoryCodeStore;
use craftlink_link::router::build_router;
use craftlink_link::state::AppState;
use craftlink_link::sweeper::run_code_sweeper;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = LinkConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        session_secret: SessionSecret(config.jwt_secret),
        mirror: MemoryCodeStore::new(),
        events: BroadcastEventSink::new(),
    };

    // Spawn the expired-code sweeper
    let sweeper_state = state.clone();
    let period = Duration::from_secs(config.sweep_interval_secs);
    tokio::spawn(async move {
        run_code_sweeper(sweeper_state, period).await;
    });

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.link_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("link service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
