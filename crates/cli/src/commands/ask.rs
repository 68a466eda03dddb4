//! `loandesk ask`: Answer one query for a customer.

use loandesk_config::AppConfig;

pub async fn run(
    config: &AppConfig,
    customer_id: &str,
    query: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = loandesk_gateway::build_assistant(config)?;
    let reply = assistant.process_query(customer_id, query).await;
    super::emit(&reply, json)
}
