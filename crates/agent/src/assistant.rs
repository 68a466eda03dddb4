//! The banking assistant: per-request orchestration.
//!
//! # Flow
//!
//! 1. Scope check (declines new products and credential requests)
//! 2. Customer lookup
//! 3. Retrieve FAQ and policy snippets
//! 4. Prepayment-cost questions get guidance asking for an amount
//! 5. Everything else is answered by the response generator
//!
//! Nothing is kept between requests. Every failure comes back as an
//! [`AssistantReply`] with `success = false`.

use crate::intent::{self, Intent};
use crate::prompt;
use crate::reply::{AssistantReply, ContextUsage, FailureReason, SPECIFY_PREPAYMENT_AMOUNT};
use crate::scope::{self, ScopeDecision};
use loandesk_config::AppConfig;
use loandesk_core::{CustomerGateway, CustomerSummary, PrepaymentOutcome, RetrievalResult};
use loandesk_knowledge::DocumentStore;
use loandesk_providers::ResponseGenerator;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

/// Tunables for the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantSettings {
    /// Total snippets requested when gathering context
    pub context_results: usize,
    /// Output budget for general answers
    pub max_tokens: u32,
    /// Output budget for prepayment explanations
    pub calculation_max_tokens: u32,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            context_results: 6,
            max_tokens: 500,
            calculation_max_tokens: 600,
        }
    }
}

impl AssistantSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            context_results: config.knowledge.context_results,
            max_tokens: config.max_tokens,
            calculation_max_tokens: config.calculation_max_tokens,
        }
    }
}

/// Answers customer queries using the bank's data, the document store,
/// and the response generator.
pub struct BankingAssistant {
    customers: Arc<dyn CustomerGateway>,
    documents: Arc<DocumentStore>,
    generator: Arc<ResponseGenerator>,
    settings: AssistantSettings,
}

impl BankingAssistant {
    pub fn new(
        customers: Arc<dyn CustomerGateway>,
        documents: Arc<DocumentStore>,
        generator: Arc<ResponseGenerator>,
    ) -> Self {
        Self {
            customers,
            documents,
            generator,
            settings: AssistantSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: AssistantSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> AssistantSettings {
        self.settings
    }

    pub fn generator(&self) -> &ResponseGenerator {
        &self.generator
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn customers(&self) -> &dyn CustomerGateway {
        self.customers.as_ref()
    }

    /// Answer a natural-language query from `customer_id`.
    pub async fn process_query(&self, customer_id: &str, query: &str) -> AssistantReply {
        let span = info_span!("process_query", request_id = %Uuid::new_v4(), customer_id);
        self.answer_query(customer_id, query).instrument(span).await
    }

    async fn answer_query(&self, customer_id: &str, query: &str) -> AssistantReply {
        let confidence = match scope::check_scope(query) {
            ScopeDecision::OutOfScope { keyword } => {
                info!(keyword, "Query declined as out of scope");
                return AssistantReply::failure(
                    FailureReason::OutOfScope,
                    prompt::OUT_OF_SCOPE_MESSAGE,
                );
            }
            ScopeDecision::InScope(confidence) => confidence,
        };

        let Some(customer) = self.customers.get_customer(customer_id) else {
            info!("Customer not found");
            return AssistantReply::failure(
                FailureReason::CustomerNotFound,
                prompt::NO_CUSTOMER_DATA_MESSAGE,
            );
        };

        let context = self
            .documents
            .search_all(query, self.settings.context_results);
        let usage = ContextUsage {
            faqs_count: context.faqs.len(),
            policies_count: context.policies.len(),
        };
        debug!(
            faqs = usage.faqs_count,
            policies = usage.policies_count,
            ?confidence,
            "Context retrieved"
        );

        if intent::classify(query) == Intent::PrepaymentGuidance {
            let Some(loan) = customer.loans.first() else {
                info!("Prepayment guidance requested without loans");
                return AssistantReply::failure(
                    FailureReason::NoActiveLoans,
                    prompt::NO_ACTIVE_LOANS_MESSAGE,
                );
            };
            info!(loan_id = %loan.loan_id, "Asking for a prepayment amount");
            return AssistantReply::answered(prompt::prepayment_guidance(loan))
                .for_query(customer_id, query)
                .with_confidence(confidence)
                .with_action(SPECIFY_PREPAYMENT_AMOUNT);
        }

        let prompt = prompt::query_prompt(query, &customer, &context);
        let generation = self.generator.generate(&prompt, self.settings.max_tokens).await;
        let source = generation.source();
        info!(generated_by = ?source, "Query answered");

        AssistantReply::answered(generation.into_text())
            .for_query(customer_id, query)
            .with_context(usage)
            .with_confidence(confidence)
            .with_source(source)
    }

    /// Quote a prepayment of `amount` against one loan and explain it.
    pub async fn calculate_prepayment(
        &self,
        customer_id: &str,
        loan_id: &str,
        amount: f64,
    ) -> AssistantReply {
        let span = info_span!(
            "calculate_prepayment",
            request_id = %Uuid::new_v4(),
            customer_id,
            loan_id
        );
        self.explain_prepayment(customer_id, loan_id, amount)
            .instrument(span)
            .await
    }

    async fn explain_prepayment(
        &self,
        customer_id: &str,
        loan_id: &str,
        amount: f64,
    ) -> AssistantReply {
        if !amount.is_finite() || amount < 0.0 {
            info!(amount, "Rejected prepayment amount");
            return AssistantReply::failure(
                FailureReason::InvalidAmount,
                loandesk_core::error::InputError::OutOfRange.to_string(),
            );
        }

        let calc = match self
            .customers
            .calculate_prepayment(customer_id, loan_id, amount)
        {
            None => {
                info!("No such customer or loan");
                return AssistantReply::failure(
                    FailureReason::LoanNotFound,
                    prompt::CALCULATION_UNAVAILABLE_MESSAGE,
                );
            }
            Some(PrepaymentOutcome::NotAllowed { message }) => {
                info!("Prepayment not allowed for loan");
                return AssistantReply::failure(FailureReason::PrepaymentNotAllowed, message);
            }
            Some(PrepaymentOutcome::Allowed(calc)) => calc,
        };

        let prompt = prompt::calculation_prompt(amount, &calc);
        let generation = self
            .generator
            .generate(&prompt, self.settings.calculation_max_tokens)
            .await;
        let source = generation.source();
        info!(
            charge = calc.prepayment_charge,
            total = calc.total_amount_to_pay,
            generated_by = ?source,
            "Prepayment explained"
        );

        AssistantReply::answered(generation.into_text())
            .with_source(source)
            .with_calculation(PrepaymentOutcome::Allowed(calc))
    }

    /// Compact account and loan overview, or `None` for unknown customers.
    pub fn customer_summary(&self, customer_id: &str) -> Option<CustomerSummary> {
        self.customers
            .get_customer(customer_id)
            .map(|c| CustomerSummary::from(&c))
    }

    pub fn search_faqs(&self, query: &str, n: usize) -> Vec<RetrievalResult> {
        self.documents.search_faqs(query, n)
    }

    pub fn search_policies(&self, query: &str, n: usize) -> Vec<RetrievalResult> {
        self.documents.search_policies(query, n)
    }
}
