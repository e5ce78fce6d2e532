//! Hirechat server binary.
//!
//! Loads configuration, wires the adapters into the dialogue handlers, and
//! serves the chat API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hirechat::adapters::ai::{GeminiAnswerGenerator, GeminiConfig};
use hirechat::adapters::http::{self, chat::ChatHandlers};
use hirechat::adapters::retrieval::InMemoryRetriever;
use hirechat::adapters::storage::InMemorySessionStore;
use hirechat::application::handlers::dialogue::{
    EndSessionHandler, GetSessionHandler, ProcessTurnHandler, StartSessionHandler,
    UpdateFieldHandler,
};
use hirechat::config::AppConfig;
use hirechat::ports::{AnswerGenerator, ContextRetriever, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if !config.ai.has_api_key() {
        warn!("No Gemini API key configured; question turns will degrade to apologies");
    }

    // Adapters
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let generator: Arc<dyn AnswerGenerator> = {
        let gemini_config = GeminiConfig::new(
            config.ai.gemini_api_key.clone().unwrap_or_default(),
        )
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());
        Arc::new(GeminiAnswerGenerator::new(gemini_config))
    };
    let retriever: Arc<dyn ContextRetriever> = Arc::new(InMemoryRetriever::new());

    // Application handlers
    let handlers = ChatHandlers::new(
        Arc::new(StartSessionHandler::new(Arc::clone(&store))),
        Arc::new(ProcessTurnHandler::new(
            Arc::clone(&store),
            Arc::clone(&generator),
            Arc::clone(&retriever),
        )),
        Arc::new(EndSessionHandler::new(Arc::clone(&store))),
        Arc::new(GetSessionHandler::new(Arc::clone(&store))),
        Arc::new(UpdateFieldHandler::new(Arc::clone(&store))),
    );

    let cors = build_cors(&config.server.cors_origins_list());
    let app = http::router(handlers)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, environment = ?config.server.environment, "starting hirechat server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}
