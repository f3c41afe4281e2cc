//! quizify-server - Main entry point
//!
//! Generates multiple-choice questions from lecture PDFs with Gemini, stores
//! them in SQLite, and grades submitted answers.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use quizify_common::config::{RootFolderInitializer, TomlConfig};
use quizify_common::db::{init_database, MemoryQuestionStore, QuestionStore, SqliteQuestionStore};
use quizify_server::ai::GeminiClient;
use quizify_server::config::{Args, ServerConfig};
use quizify_server::extract::PdfTextExtractor;
use quizify_server::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizify_server=info,quizify_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification before any slow startup work
    info!(
        "Starting quizify-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let toml_config =
        TomlConfig::load_or_default(args.config.as_deref()).context("Failed to load config file")?;
    let config = ServerConfig::resolve(args, &toml_config);

    let store: Arc<dyn QuestionStore> = if config.in_memory {
        warn!("Using in-memory question store; questions are lost on exit");
        Arc::new(MemoryQuestionStore::new())
    } else {
        let initializer = RootFolderInitializer::new(config.root_folder.clone());
        initializer
            .ensure_directory_exists()
            .context("Failed to initialize root folder")?;

        let db_path = initializer.database_path();
        info!("Database path: {}", db_path.display());

        let pool = init_database(&db_path)
            .await
            .context("Failed to open question database")?;
        info!("✓ Connected to database");
        Arc::new(SqliteQuestionStore::new(pool))
    };

    let generator = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.model.clone(),
        config.ai_timeout,
    )
    .context("Failed to create Gemini client")?;

    if generator.has_api_key() {
        info!("Gemini model: {} (timeout {:?})", generator.model(), config.ai_timeout);
    } else {
        warn!("GEMINI_API_KEY is not set; /text and /upload-pdf will fail until it is configured");
    }

    let state = AppState::new(
        store,
        Arc::new(generator),
        Arc::new(PdfTextExtractor),
        config.ingest,
    );
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("quizify-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
