//! Error types for the LoanDesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum. Only startup paths surface
//! these to callers; the request pipeline answers with structured results.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for LoanDesk operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Knowledge base errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Bank data errors ---
    #[error("Bank data error: {0}")]
    Bank(#[from] BankError),

    // --- Input validation ---
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read corpus at {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to parse corpus at {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Failed to read fixtures at {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to parse fixtures at {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    #[error("Duplicate loan id {loan_id} for customer {customer_id}")]
    DuplicateLoan {
        customer_id: String,
        loan_id: String,
    },

    /// A money field that is negative or not finite. `loan_id` is `None`
    /// for account-level fields.
    #[error("Invalid {field} for customer {customer_id}{}: must be a finite, non-negative amount", .loan_id.as_deref().map(|id| format!(" loan {id}")).unwrap_or_default())]
    InvalidAmount {
        customer_id: String,
        loan_id: Option<String>,
        field: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Invalid prepayment_amount: must be a number")]
    NotANumber,

    #[error("Invalid prepayment_amount: must be a finite, non-negative amount")]
    OutOfRange,
}
