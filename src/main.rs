use std::sync::Arc;

use cadence_api::{
    api::{create_router, AppState},
    config::Config,
    services::{providers::SpotifyProvider, Recommender},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Refuse to serve anything with a partially loaded model
    let recommender = Recommender::load(
        &config.scaler_path,
        &config.cluster_model_path,
        &config.catalog_path,
    )?
    .with_default_limit(config.default_limit);

    let info = recommender.info();
    tracing::info!(
        clusters = info.cluster_count,
        catalog_size = info.catalog_size,
        model = ?info.model_name,
        "Recommendation pipeline ready"
    );

    let provider = Arc::new(SpotifyProvider::new(
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
        config.spotify_api_url.clone(),
        config.spotify_accounts_url.clone(),
    ));

    let state = AppState::new(recommender, provider).with_session_ttl(config.session_ttl());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
