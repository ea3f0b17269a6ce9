// Main Entry Point untuk Chat Service
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod domain;
mod error;
mod handlers;
mod repositories;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_service=debug,shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("💬 Starting Anonymous Chat Service");

    let state = config::AppState::from_env()
        .map_err(anyhow::Error::msg)
        .context("Failed to load configuration")?;
    tracing::info!("✅ In-memory chat store initialized");

    tracing::info!("🏷️  Instance: {}", state.config.instance_name);
    tracing::info!("🌍 Environment: {}", state.config.environment);
    match state.config.frontend_url.as_deref() {
        Some(origin) => tracing::info!("🔒 CORS origin: {}", origin),
        None => tracing::info!("🔓 CORS permissive (FRONTEND_URL not set)"),
    }

    // Build application dengan semua layers
    let app = routes::create_router(state.clone());

    let addr = state.config.bind_address();
    let base = &state.config.base_path;

    tracing::info!("🎯 Chat Service listening on {}", addr);
    tracing::info!("📚 API Documentation:");
    tracing::info!("   - Swagger UI: http://{}/docs", addr);
    tracing::info!("   - ReDoc: http://{}/redoc", addr);
    tracing::info!("   - Health Check: http://{}/health", addr);
    tracing::info!("💬 Chat Endpoints:");
    tracing::info!("   - POST {}/chat/start", base);
    tracing::info!("   - POST {}/chat/{{chat_id}}/message", base);
    tracing::info!("   - GET  {}/chat/{{chat_id}}/messages", base);

    // Graceful shutdown setup
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("🛑 Received shutdown signal");
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🌐 Server bound to {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("👋 Chat Service shutdown complete");

    Ok(())
}
