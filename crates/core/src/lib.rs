//! # LoanDesk Core
//!
//! Domain types, traits, and error definitions for the LoanDesk banking
//! assistant. This crate has **no framework dependencies**: it defines the
//! model that the knowledge, bank, provider, and agent crates implement
//! against.
//!
//! Every collaborator the assistant talks to is a trait here:
//! - [`CustomerGateway`] for account and loan lookups
//! - [`Provider`] for text-generation backends

pub mod error;
pub mod message;
pub mod provider;
pub mod account;
pub mod document;
pub mod money;

pub use error::{Error, Result};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use account::{
    AccountDetails, CustomerGateway, CustomerRecord, CustomerSummary, LoanRecord, LoanStatus,
    LoanSummary, PrepaymentCalculation, PrepaymentOutcome,
};
pub use document::{DocumentEntry, DocumentKind, RetrievalResult, RetrievedContext};
pub use money::{format_currency, format_rate, parse_amount};
