//! Route handlers.
//!
//! Bodies are extracted as `Result<Json<T>, JsonRejection>` so that every
//! malformed request is answered with a 400 `{error}` body instead of axum's
//! plain-text rejection.

use crate::AppState;
use crate::error::ApiError;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use loandesk_agent::AssistantReply;
use loandesk_core::{CustomerSummary, RetrievalResult, parse_amount};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "loandesk",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    customer_id: Option<String>,
    query: Option<String>,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<AssistantReply>, ApiError> {
    let Json(req) = payload?;
    let (Some(customer_id), Some(query)) = (req.customer_id, req.query) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: customer_id and query".into(),
        ));
    };

    info!(customer_id = %customer_id, query_len = query.len(), "Chat request");
    Ok(Json(state.assistant.process_query(&customer_id, &query).await))
}

#[derive(Debug, Deserialize)]
pub struct PrepaymentRequest {
    customer_id: Option<String>,
    loan_id: Option<String>,
    /// Number or numeric string.
    prepayment_amount: Option<serde_json::Value>,
}

pub async fn prepayment_handler(
    State(state): State<AppState>,
    payload: Result<Json<PrepaymentRequest>, JsonRejection>,
) -> Result<Json<AssistantReply>, ApiError> {
    let Json(req) = payload?;
    let (Some(customer_id), Some(loan_id), Some(raw_amount)) =
        (req.customer_id, req.loan_id, req.prepayment_amount)
    else {
        return Err(ApiError::missing(&[
            "customer_id",
            "loan_id",
            "prepayment_amount",
        ]));
    };
    let amount = parse_amount(&raw_amount)?;

    info!(customer_id = %customer_id, loan_id = %loan_id, "Prepayment request");
    Ok(Json(
        state
            .assistant
            .calculate_prepayment(&customer_id, &loan_id, amount)
            .await,
    ))
}

pub async fn summary_handler(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerSummary>, ApiError> {
    state
        .assistant
        .customer_summary(&customer_id)
        .map(Json)
        .ok_or(ApiError::NotFound("Customer not found"))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    query: Option<String>,
    n_results: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    query: String,
    results: Vec<RetrievalResult>,
}

fn search_params(
    state: &AppState,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<(String, usize), ApiError> {
    let Json(req) = payload?;
    let query = req.query.ok_or_else(|| ApiError::missing(&["query"]))?;
    Ok((query, req.n_results.unwrap_or(state.default_results)))
}

pub async fn search_faqs_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (query, n) = search_params(&state, payload)?;
    let results = state.assistant.search_faqs(&query, n);
    Ok(Json(SearchResponse { query, results }))
}

pub async fn search_policies_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (query, n) = search_params(&state, payload)?;
    let results = state.assistant.search_policies(&query, n);
    Ok(Json(SearchResponse { query, results }))
}
