//! `loandesk demo`: Scripted walkthrough of the assistant.
//!
//! Five customer questions, one prepayment quote, then the account summary.

use loandesk_config::AppConfig;
use loandesk_core::format_currency;

const QUERIES: [&str; 5] = [
    "What's my current EMI and can I prepay this month?",
    "What is EMI?",
    "How much prepayment charges will I have to pay?",
    "When is my next EMI due?",
    "What is my outstanding loan amount?",
];

const LOAN_ID: &str = "LOAN001";
const PREPAYMENT_AMOUNT: f64 = 100_000.0;

fn banner(title: &str) {
    println!("\n\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

pub async fn run(config: &AppConfig, customer_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = loandesk_gateway::build_assistant(config)?;

    println!("{}", "=".repeat(60));
    println!("LOANDESK DEMO");
    println!("{}", "=".repeat(60));
    match assistant.generator().provider_name() {
        Some(provider) => println!("Generator: {provider}"),
        None => println!("Generator: offline templates"),
    }
    println!("\nCustomer ID: {customer_id}");

    for (i, query) in QUERIES.iter().enumerate() {
        println!("\n{}", "-".repeat(60));
        println!("Query {}: {query}", i + 1);
        println!("{}", "-".repeat(60));

        let reply = assistant.process_query(customer_id, query).await;
        if reply.success {
            println!("\nResponse:\n{}", reply.response);
            if let Some(usage) = reply.context_used {
                println!(
                    "\n[Context used: {} FAQs, {} policies]",
                    usage.faqs_count, usage.policies_count
                );
            }
        } else {
            println!("\nError: {}", reply.response);
        }
    }

    banner("PREPAYMENT CALCULATION DEMO");
    println!("\nCalculating prepayment for Loan ID: {LOAN_ID}");
    println!("Prepayment Amount: {}\n", format_currency(PREPAYMENT_AMOUNT));

    let reply = assistant
        .calculate_prepayment(customer_id, LOAN_ID, PREPAYMENT_AMOUNT)
        .await;
    if reply.success {
        println!("Response:\n{}", reply.response);
        if let Some(calc) = reply.calculation.as_ref().and_then(|o| o.calculation()) {
            println!("\n[Detailed Calculation]");
            println!("Total to Pay: {}", format_currency(calc.total_amount_to_pay));
            println!("New Outstanding: {}", format_currency(calc.new_outstanding));
        }
    } else {
        println!("Error: {}", reply.response);
    }

    banner("CUSTOMER SUMMARY");
    println!();
    if let Some(summary) = assistant.customer_summary(customer_id) {
        super::summary::print_summary(&summary);
    }
    println!("\n{}", "=".repeat(60));

    Ok(())
}
