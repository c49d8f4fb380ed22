// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use symptobuddy::{AppConfig, AppState, PredictionService, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting SymptoBuddy prediction service...");
    tracing::debug!("Configuration loaded: {:?}", config);

    let service = PredictionService::from_config(&config)?;
    tracing::info!(
        "Model ready: {} classes, {} symptoms, enrichment={}",
        service.decoder().len(),
        service.vocabulary().len(),
        service.enrichment_enabled()
    );

    if config.server.cors_permissive {
        tracing::warn!(
            "CORS allows every origin, method and header; restrict it before exposing the service"
        );
    }

    let app_state = AppState::new(Arc::new(service))
        .with_strict_status_codes(config.server.strict_status_codes);
    let app = create_router(app_state, &config.server);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
