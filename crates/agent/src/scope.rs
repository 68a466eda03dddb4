//! Query scope check.
//!
//! Both keyword lists are plain case-insensitive substring checks, and the
//! out-of-scope list is consulted first.

use serde::{Deserialize, Serialize};

/// Requests the assistant must decline, checked in this order.
pub const OUT_OF_SCOPE_KEYWORDS: &[&str] = &[
    "new account",
    "open account",
    "new loan application",
    "credit card",
    "debit card",
    "apply for",
    "password",
    "otp",
    "pin",
];

/// Terms that mark a query as clearly about existing loans or accounts.
pub const IN_SCOPE_KEYWORDS: &[&str] = &[
    "emi",
    "loan",
    "prepay",
    "prepayment",
    "outstanding",
    "balance",
    "account",
    "payment",
    "interest",
    "tenure",
];

/// How sure the scope check is that a query belongs here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDecision {
    /// Declined; `keyword` is the first out-of-scope term found.
    OutOfScope { keyword: &'static str },
    /// Accepted. Low confidence never blocks a query.
    InScope(Confidence),
}

pub fn check_scope(query: &str) -> ScopeDecision {
    let query = query.to_lowercase();

    let declined = OUT_OF_SCOPE_KEYWORDS.iter().copied().find(|k| query.contains(k));
    if let Some(keyword) = declined {
        return ScopeDecision::OutOfScope { keyword };
    }

    if IN_SCOPE_KEYWORDS.iter().any(|k| query.contains(k)) {
        ScopeDecision::InScope(Confidence::High)
    } else {
        ScopeDecision::InScope(Confidence::Low)
    }
}
