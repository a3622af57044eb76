mod backend;
mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::BackendConfig::from_env().expect("backend configuration");
    let port = config::port_from_env().expect("invalid PORT");

    let backend = backend::supabase::SupabaseClient::new(&config).expect("identity backend init failed");
    tracing::info!(
        base_url = %config.base_url,
        table = %config.profile_table,
        orphan_policy = ?config.orphan_policy,
        "identity backend configured"
    );

    let state = state::AppState::new(Arc::new(backend), config.orphan_policy);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "signup server listening");
    axum::serve(listener, app).await.expect("server failed");
}
