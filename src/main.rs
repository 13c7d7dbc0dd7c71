//! Spotty - menu-driven customer service bot for Spot1Mobile
//!
//! Serves the dialogue engine behind an action-server webhook and a direct
//! JSON turn API.

mod api;
mod carrier;
mod config;
mod render;
mod runtime;
mod session;
mod state_machine;
mod validate;

use api::{create_router, AppState};
use carrier::{CarrierExtractor, Vocabulary};
use config::AppConfig;
use render::Renderer;
use runtime::DialogueRuntime;
use session::{InMemorySessionStore, SessionStore};
use state_machine::DialogueEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spotty_bot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env()?;

    // Carrier vocabulary
    let vocabulary = match &config.carriers_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading carrier vocabulary");
            Vocabulary::from_path(path)?
        }
        None => Vocabulary::bundled()?,
    };
    tracing::info!(
        version = %vocabulary.version(),
        carriers = vocabulary.carrier_count(),
        aliases = vocabulary.alias_count(),
        "Carrier vocabulary loaded"
    );

    let extractor = Arc::new(CarrierExtractor::new(vocabulary)?);
    let engine = DialogueEngine::new(extractor);
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let runtime = DialogueRuntime::new(engine, store);
    let renderer = Renderer::new(config.image_base_url.clone());

    // Create application state
    let state = AppState::new(runtime, renderer);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Spotty action server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
