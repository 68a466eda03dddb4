//! Structured results returned by the assistant.
//!
//! Every result carries `success` and a human-readable `response`; the
//! remaining fields appear only where they apply.

use crate::scope::Confidence;
use loandesk_core::PrepaymentOutcome;
use loandesk_providers::GenerationSource;
use serde::{Deserialize, Serialize};

/// Machine-readable reason attached to unsuccessful results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    OutOfScope,
    CustomerNotFound,
    NoActiveLoans,
    InvalidAmount,
    LoanNotFound,
    PrepaymentNotAllowed,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfScope => "out_of_scope",
            Self::CustomerNotFound => "customer_not_found",
            Self::NoActiveLoans => "no_active_loans",
            Self::InvalidAmount => "invalid_amount",
            Self::LoanNotFound => "loan_not_found",
            Self::PrepaymentNotAllowed => "prepayment_not_allowed",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many snippets of each kind were retrieved for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextUsage {
    pub faqs_count: usize,
    pub policies_count: usize,
}

/// Follow-up the customer is asked to provide.
pub const SPECIFY_PREPAYMENT_AMOUNT: &str = "specify_prepayment_amount";

#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub response: String,
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_used: Option<ContextUsage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<GenerationSource>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_required: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation: Option<PrepaymentOutcome>,
}

impl AssistantReply {
    /// A successful reply with no extra fields.
    pub fn answered(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            success: true,
            reason: None,
            customer_id: None,
            query: None,
            context_used: None,
            confidence: None,
            generated_by: None,
            action_required: None,
            calculation: None,
        }
    }

    pub fn failure(reason: FailureReason, response: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason),
            ..Self::answered(response)
        }
    }

    pub fn for_query(mut self, customer_id: &str, query: &str) -> Self {
        self.customer_id = Some(customer_id.to_string());
        self.query = Some(query.to_string());
        self
    }

    pub fn with_context(mut self, usage: ContextUsage) -> Self {
        self.context_used = Some(usage);
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_source(mut self, source: GenerationSource) -> Self {
        self.generated_by = Some(source);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action_required = Some(action.into());
        self
    }

    pub fn with_calculation(mut self, outcome: PrepaymentOutcome) -> Self {
        self.calculation = Some(outcome);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_serializes_reason_and_hides_empty_fields() {
        let reply = AssistantReply::failure(FailureReason::OutOfScope, "no");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["reason"], "out_of_scope");
        assert!(json.get("customer_id").is_none());
        assert!(json.get("calculation").is_none());
    }

    #[test]
    fn answered_reply_carries_context() {
        let reply = AssistantReply::answered("EMI is ...")
            .for_query("CUST001", "What is EMI?")
            .with_context(ContextUsage {
                faqs_count: 4,
                policies_count: 4,
            })
            .with_confidence(Confidence::High)
            .with_source(GenerationSource::Offline);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("reason").is_none());
        assert_eq!(json["context_used"]["faqs_count"], 4);
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["generated_by"], "offline");
    }

    #[test]
    fn reason_strings_match_serde() {
        for reason in [
            FailureReason::CustomerNotFound,
            FailureReason::NoActiveLoans,
            FailureReason::InvalidAmount,
            FailureReason::LoanNotFound,
            FailureReason::PrepaymentNotAllowed,
        ] {
            let json = serde_json::to_value(reason).unwrap();
            assert_eq!(json, reason.as_str());
        }
    }
}
