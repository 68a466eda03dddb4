//! `loandesk prepay`: Quote a prepayment against one loan.

use loandesk_config::AppConfig;
use loandesk_core::parse_amount;

pub async fn run(
    config: &AppConfig,
    customer_id: &str,
    loan_id: &str,
    amount: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let amount = parse_amount(&serde_json::Value::String(amount.to_string()))?;

    let assistant = loandesk_gateway::build_assistant(config)?;
    let reply = assistant
        .calculate_prepayment(customer_id, loan_id, amount)
        .await;
    super::emit(&reply, json)
}
