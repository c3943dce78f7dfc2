//! docmeta-server - web interface binary.

use std::net::SocketAddr;

use docmeta_core::{DocMetaConfig, DocumentProcessor};
use docmeta_llm::LlmFactory;
use docmeta_server::{create_server, AppState};
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("docmeta_server=debug".parse()?),
        )
        .init();

    let config = DocMetaConfig::load()?;
    config.validate()?;

    let llm = if config.insights.enabled {
        let llm = LlmFactory::from_config(&config.llm)?;
        info!(
            provider = %config.llm.provider,
            model = %llm.model_name(),
            "Summarization provider ready"
        );
        Some(llm)
    } else {
        warn!("Summaries disabled; insight fields will be empty");
        None
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(DocumentProcessor::with_defaults(config, llm));
    let app = create_server(state);

    info!("Starting docmeta-server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
