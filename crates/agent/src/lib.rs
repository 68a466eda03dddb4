//! Query orchestration for LoanDesk.
//!
//! [`BankingAssistant`] ties the customer gateway, document store, and
//! response generator together. Each call is independent: scope check,
//! customer lookup, retrieval, then either prepayment guidance or a
//! generated answer.

pub mod assistant;
pub mod intent;
pub mod prompt;
pub mod reply;
pub mod scope;

pub use assistant::{AssistantSettings, BankingAssistant};
pub use intent::Intent;
pub use reply::{AssistantReply, ContextUsage, FailureReason, SPECIFY_PREPAYMENT_AMOUNT};
pub use scope::{Confidence, ScopeDecision};
