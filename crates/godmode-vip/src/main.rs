//! Godmode VIP - HTTP server for personalized invite links.
//!
//! Serves Open Graph previews to link-preview crawlers and redirects
//! browsers to the interactive invite page.

use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use godmode_vip::{AppState, Config, router};

/// Godmode VIP - crawler-aware invite link responder.
#[derive(Parser, Debug)]
#[command(name = "godmode-vip")]
#[command(about = "Open Graph previews for crawlers, loop-safe redirects for browsers", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load .env file if it exists

    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    match config.public_origin.as_deref() {
        Some(origin) => tracing::info!(origin = %origin, "advertising configured public origin"),
        None => tracing::info!("deriving origin from Host and X-Forwarded-Proto"),
    }

    // Build signature registry, creator directory and locale tables
    let state = AppState::new(config)?;
    tracing::info!(
        directory = state.directory.kind(),
        signatures = state.signatures.len(),
        page = %state.config.page_path.display(),
        "vip responder ready"
    );

    // Build router with middleware
    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting vip server");

    axum::serve(listener, app).await?;

    Ok(())
}
