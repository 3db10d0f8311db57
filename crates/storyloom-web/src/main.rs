//! Storyloom web server entry point.

use std::error::Error;
use std::sync::Arc;

use storyloom_core::clock::SystemClock;
use storyloom_llm::GeneratorClient;
use storyloom_store::InMemoryStoryRepository;
use storyloom_web::config::AppConfig;
use storyloom_web::state::AppState;
use storyloom_web::telemetry;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Storyloom web server");
    tracing::info!(
        backend = %config.llm.backend,
        claude_wait_secs = config.claude_wait_duration.as_secs(),
        "generation backend configured"
    );

    let generator = GeneratorClient::from_config(&config.llm);
    let app_state = AppState::new(
        Arc::new(SystemClock),
        generator.backend(),
        Arc::new(generator),
        Arc::new(InMemoryStoryRepository::new()),
    );

    let app = storyloom_web::app(app_state).layer(TraceLayer::new_for_http());

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    telemetry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
