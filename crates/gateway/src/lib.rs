//! HTTP API gateway for LoanDesk.
//!
//! Exposes the assistant over JSON: chat, prepayment quotes, customer
//! summaries, and raw FAQ/policy search. Built on Axum.

pub mod error;
pub mod routes;

pub use error::ApiError;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use loandesk_agent::{AssistantSettings, BankingAssistant};
use loandesk_bank::MockBankGateway;
use loandesk_config::AppConfig;
use loandesk_knowledge::DocumentStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Request body limit for every route.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<BankingAssistant>,
    /// `n_results` used by the search routes when the request omits it.
    pub default_results: usize,
}

impl AppState {
    pub fn new(assistant: Arc<BankingAssistant>, default_results: usize) -> Self {
        Self {
            assistant,
            default_results,
        }
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(routes::health_handler))
        .route("/chat", post(routes::chat_handler))
        .route("/prepayment/calculate", post(routes::prepayment_handler))
        .route("/customer/{customer_id}/summary", get(routes::summary_handler))
        .route("/search/faqs", post(routes::search_faqs_handler))
        .route("/search/policies", post(routes::search_policies_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Assemble the assistant from configuration.
///
/// Loads the corpus and customer fixtures from disk when paths are
/// configured, otherwise falls back to the built-in corpus and demo
/// customers. The generator runs offline when no provider is usable.
pub fn build_assistant(config: &AppConfig) -> loandesk_core::Result<BankingAssistant> {
    let documents = match &config.knowledge.corpus_path {
        Some(path) => DocumentStore::from_json_file(path)?,
        None => DocumentStore::builtin(),
    };
    let customers = match &config.bank.fixtures_path {
        Some(path) => MockBankGateway::from_json_file(path)?,
        None => MockBankGateway::demo(),
    };
    let generator = loandesk_providers::build_generator(config);

    info!(
        faqs = documents.faq_count(),
        policies = documents.policy_count(),
        customers = customers.len(),
        provider = generator.provider_name().unwrap_or("offline"),
        "Assistant assembled"
    );

    Ok(BankingAssistant::new(
        Arc::new(customers),
        Arc::new(documents),
        Arc::new(generator),
    )
    .with_settings(AssistantSettings::from_config(config)))
}

/// Start the gateway HTTP server and serve until the process exits.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let assistant = build_assistant(&config)?;
    let state = AppState::new(Arc::new(assistant), config.knowledge.default_results);
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
