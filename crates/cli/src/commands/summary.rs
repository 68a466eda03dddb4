//! `loandesk summary`: Show a customer's accounts and loans.

use loandesk_config::AppConfig;
use loandesk_core::{CustomerSummary, format_currency};

pub fn run(config: &AppConfig, customer_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = loandesk_gateway::build_assistant(config)?;

    match assistant.customer_summary(customer_id) {
        Some(summary) => print_summary(&summary),
        None => println!("Customer not found"),
    }

    Ok(())
}

pub fn print_summary(summary: &CustomerSummary) {
    println!("Name: {}", summary.customer_name);
    println!("Account Number: {}", summary.account_number);
    println!("Account Balance: {}", format_currency(summary.account_balance));
    println!("\nTotal Loans: {}", summary.total_loans);

    for loan in &summary.loans {
        println!("\n  {} ({})", loan.loan_type, loan.loan_id);
        println!("    Outstanding: {}", format_currency(loan.outstanding));
        println!("    EMI: {}", format_currency(loan.emi));
        println!("    Next EMI Date: {}", loan.next_emi_date);
    }
}
