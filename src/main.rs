use std::error::Error;

use rendezvous::config::{AppEnv, Config};
use rendezvous::services::jwt::JwtService;
use tokio::net::TcpListener;
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(app_env: AppEnv) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rendezvous=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match app_env {
        AppEnv::Production => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                "rendezvous".into(),
                std::io::stdout,
            ))
            .init(),
        AppEnv::Development => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.app_env);

    let store = rendezvous::build_store(&config).await?;
    let jwt_service = JwtService::from_secret(config.jwt_secret.as_bytes());
    let app = rendezvous::app(store.clone(), jwt_service);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Server starting at http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    Ok(())
}
