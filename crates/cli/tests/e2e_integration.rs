//! End-to-end integration tests for the LoanDesk assistant.
//!
//! These tests exercise the full pipeline from a customer query to the
//! structured reply: scope check, customer lookup, retrieval, prompt
//! composition, generation and the offline fallback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use loandesk_agent::{BankingAssistant, FailureReason, SPECIFY_PREPAYMENT_AMOUNT};
use loandesk_bank::MockBankGateway;
use loandesk_core::error::ProviderError;
use loandesk_core::message::{Message, Role};
use loandesk_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use loandesk_core::{CustomerGateway, CustomerRecord, PrepaymentOutcome};
use loandesk_knowledge::{DocumentStore, relevance};
use loandesk_providers::{GenerationSource, ResponseGenerator, SYSTEM_PROMPT};

// ── Mock Providers ───────────────────────────────────────────────────────

/// A mock provider that answers every request with the same text and keeps
/// the requests it saw.
struct ScriptedProvider {
    answer: String,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        Ok(ProviderResponse {
            message: Message::assistant(&self.answer),
            usage: Some(Usage {
                prompt_tokens: 120,
                completion_tokens: 30,
                total_tokens: 150,
            }),
            model: "e2e-model".into(),
        })
    }
}

/// A provider whose backend is always unreachable.
struct UnreachableProvider;

#[async_trait::async_trait]
impl Provider for UnreachableProvider {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::ApiError {
            status_code: 503,
            message: "service unavailable".into(),
        })
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn demo_bank() -> MockBankGateway {
    MockBankGateway::with_demo_data(today())
}

fn assistant(bank: MockBankGateway, generator: ResponseGenerator) -> BankingAssistant {
    BankingAssistant::new(
        Arc::new(bank),
        Arc::new(DocumentStore::builtin()),
        Arc::new(generator),
    )
}

fn with_provider(provider: Arc<ScriptedProvider>) -> BankingAssistant {
    assistant(
        demo_bank(),
        ResponseGenerator::new(provider, "e2e-model", 0.1),
    )
}

fn offline() -> BankingAssistant {
    assistant(demo_bank(), ResponseGenerator::offline())
}

// ── Scope ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_out_of_scope_is_declined_for_any_customer() {
    let provider = Arc::new(ScriptedProvider::new("should not be used"));
    let assistant = with_provider(provider.clone());

    for customer in ["CUST001", "CUST002", "CUST999", ""] {
        for query in [
            "I want to open a new account",
            "Can I get a credit card?",
            "I forgot my PIN",
            "Send me an OTP",
        ] {
            let reply = assistant.process_query(customer, query).await;
            assert!(!reply.success, "{query} for {customer}");
            assert_eq!(reply.reason, Some(FailureReason::OutOfScope));
        }
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn e2e_unknown_customer_is_reported() {
    let reply = offline().process_query("CUST999", "What is EMI?").await;
    assert!(!reply.success);
    assert_eq!(reply.reason, Some(FailureReason::CustomerNotFound));
    assert!(reply.response.contains("don't have access to your account"));
}

// ── Answering ────────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_general_question_uses_model_with_context() {
    let provider = Arc::new(ScriptedProvider::new(
        "  EMI stands for Equated Monthly Installment.\n",
    ));
    let assistant = with_provider(provider.clone());

    let reply = assistant.process_query("CUST001", "What is EMI?").await;

    assert!(reply.success);
    assert_eq!(reply.response, "EMI stands for Equated Monthly Installment.");
    assert_eq!(reply.generated_by, Some(GenerationSource::Model));
    assert_eq!(reply.customer_id.as_deref(), Some("CUST001"));
    assert_eq!(reply.query.as_deref(), Some("What is EMI?"));
    let usage = reply.context_used.expect("context usage reported");
    assert!(usage.faqs_count >= 1);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model, "e2e-model");
    assert_eq!(request.max_tokens, Some(500));
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert_eq!(request.messages[1].role, Role::User);

    let prompt = &request.messages[1].content;
    assert!(prompt.contains("Customer Name: John Doe"));
    assert!(prompt.contains("Loan ID: LOAN001"));
    assert!(prompt.contains("RELEVANT FAQs:"));
    assert!(prompt.contains("=== USER QUERY ===\nWhat is EMI?"));
}

#[tokio::test]
async fn e2e_backend_failure_falls_back_offline() {
    let assistant = assistant(
        demo_bank(),
        ResponseGenerator::new(Arc::new(UnreachableProvider), "e2e-model", 0.1),
    );

    let reply = assistant
        .process_query("CUST001", "What is my outstanding loan amount?")
        .await;

    assert!(reply.success);
    assert_eq!(reply.generated_by, Some(GenerationSource::Offline));
    assert!(!reply.response.is_empty());
    assert!(reply.reason.is_none());
}

#[tokio::test]
async fn e2e_offline_answers_are_deterministic() {
    let assistant = offline();
    let first = assistant.process_query("CUST001", "When is my next EMI due?").await;
    let second = assistant.process_query("CUST001", "When is my next EMI due?").await;
    assert_eq!(first.response, second.response);
    assert_eq!(first.generated_by, Some(GenerationSource::Offline));
}

#[tokio::test]
async fn e2e_prepayment_question_asks_for_amount() {
    let provider = Arc::new(ScriptedProvider::new("unused"));
    let assistant = with_provider(provider.clone());

    let reply = assistant
        .process_query("CUST001", "How much prepayment charges will I have to pay?")
        .await;

    assert!(reply.success);
    assert_eq!(reply.action_required.as_deref(), Some(SPECIFY_PREPAYMENT_AMOUNT));
    assert!(reply.response.contains("Home Loan"));
    assert!(reply.response.contains("₹4,250,000.00"));
    assert_eq!(provider.calls(), 0);
}

// ── Prepayment ───────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_prepayment_calculation() {
    let provider = Arc::new(ScriptedProvider::new("You will pay ₹102,000.00 in total."));
    let assistant = with_provider(provider.clone());

    let reply = assistant
        .calculate_prepayment("CUST001", "LOAN001", 100_000.0)
        .await;

    assert!(reply.success);
    assert_eq!(reply.generated_by, Some(GenerationSource::Model));
    let calc = reply
        .calculation
        .as_ref()
        .and_then(PrepaymentOutcome::calculation)
        .expect("calculation attached");
    assert_eq!(calc.prepayment_charge, 2000.0);
    assert_eq!(calc.total_amount_to_pay, 102000.0);
    assert_eq!(calc.new_outstanding, 4150000.0);

    let json = serde_json::to_value(&reply).unwrap();
    assert_eq!(json["calculation"]["allowed"], true);

    let requests = provider.requests();
    assert_eq!(requests[0].max_tokens, Some(600));
    assert!(
        requests[0].messages[1]
            .content
            .starts_with("=== PREPAYMENT CALCULATION ===")
    );
}

#[tokio::test]
async fn e2e_prepayment_larger_than_outstanding_clears_loan() {
    let reply = offline()
        .calculate_prepayment("CUST002", "LOAN002", 500_000.0)
        .await;
    let calc = reply
        .calculation
        .as_ref()
        .and_then(PrepaymentOutcome::calculation)
        .unwrap();
    assert_eq!(calc.new_outstanding, 0.0);
}

#[tokio::test]
async fn e2e_prepayment_not_allowed() {
    let mut record = demo_bank().get_customer("CUST001").unwrap();
    record.loans[0].prepayment_allowed = false;
    let bank = MockBankGateway::from_records(vec![record]).unwrap();
    let assistant = assistant(bank, ResponseGenerator::offline());

    let reply = assistant
        .calculate_prepayment("CUST001", "LOAN001", 100_000.0)
        .await;

    assert!(!reply.success);
    assert_eq!(reply.reason, Some(FailureReason::PrepaymentNotAllowed));
    assert!(reply.calculation.is_none());
}

#[tokio::test]
async fn e2e_prepayment_unknown_loan_or_customer() {
    let assistant = offline();
    for (customer, loan) in [("CUST001", "LOAN002"), ("CUST999", "LOAN001")] {
        let reply = assistant.calculate_prepayment(customer, loan, 1000.0).await;
        assert!(!reply.success);
        assert_eq!(reply.reason, Some(FailureReason::LoanNotFound));
        assert_eq!(
            reply.response,
            "Unable to calculate prepayment. Please check your loan details."
        );
    }
}

/// Wraps the demo bank and counts customer lookups.
struct CountingGateway {
    inner: MockBankGateway,
    lookups: AtomicUsize,
}

impl CustomerGateway for CountingGateway {
    fn name(&self) -> &str {
        "counting"
    }

    fn get_customer(&self, customer_id: &str) -> Option<CustomerRecord> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_customer(customer_id)
    }
}

#[tokio::test]
async fn e2e_invalid_amount_never_reaches_gateway() {
    let gateway = Arc::new(CountingGateway {
        inner: demo_bank(),
        lookups: AtomicUsize::new(0),
    });
    let assistant = BankingAssistant::new(
        gateway.clone(),
        Arc::new(DocumentStore::builtin()),
        Arc::new(ResponseGenerator::offline()),
    );

    for amount in [f64::NAN, -5.0, f64::INFINITY] {
        let reply = assistant
            .calculate_prepayment("CUST001", "LOAN001", amount)
            .await;
        assert!(!reply.success);
        assert_eq!(reply.reason, Some(FailureReason::InvalidAmount));
    }
    assert_eq!(gateway.lookups.load(Ordering::SeqCst), 0);

    let reply = assistant
        .calculate_prepayment("CUST001", "LOAN001", 100_000.0)
        .await;
    assert!(reply.success);
    assert_eq!(gateway.lookups.load(Ordering::SeqCst), 1);
}

// ── Demo session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_demo_session() {
    let assistant = offline();
    let queries = [
        "What's my current EMI and can I prepay this month?",
        "What is EMI?",
        "How much prepayment charges will I have to pay?",
        "When is my next EMI due?",
        "What is my outstanding loan amount?",
    ];

    for query in queries {
        let reply = assistant.process_query("CUST001", query).await;
        assert!(reply.success, "{query}");
    }

    let summary = assistant.customer_summary("CUST001").unwrap();
    assert_eq!(summary.customer_name, "John Doe");
    assert_eq!(summary.total_loans, 1);
    assert_eq!(summary.loans[0].loan_id, "LOAN001");
    assert!(summary.loans[0].next_emi_date > today());
    assert!(assistant.customer_summary("CUST999").is_none());
}

// ── Retrieval ────────────────────────────────────────────────────────────

#[test]
fn e2e_search_respects_limits() {
    let assistant = offline();
    assert_eq!(assistant.search_faqs("prepayment charges", 2).len(), 2);
    assert_eq!(assistant.search_policies("late payment", 3).len(), 3);
    assert!(assistant.search_faqs("prepayment", 0).is_empty());

    let faqs = assistant.search_faqs("prepayment charges", 10);
    assert!(faqs.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(faqs.iter().all(|r| (0.0..=1.0).contains(&r.score)));
}

#[test]
fn e2e_relevance_bounds() {
    assert_eq!(relevance("foreclosure", "foreclosure"), 1.0);
    assert_eq!(relevance("", "anything"), 0.0);
    for (query, text) in [
        ("what is emi", "EMI is the monthly installment"),
        ("late fee on emi", "Late payment of EMI attracts a fee"),
        ("xyz", "unrelated"),
    ] {
        let score = relevance(query, text);
        assert!((0.0..=1.0).contains(&score), "{query}: {score}");
    }
}
