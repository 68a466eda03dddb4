//! Subcommand implementations.

pub mod ask;
pub mod demo;
pub mod prepay;
pub mod search;
pub mod serve;
pub mod status;
pub mod summary;

use loandesk_agent::AssistantReply;
use loandesk_config::AppConfig;
use loandesk_core::{format_currency, format_rate};
use std::path::Path;

pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load_with(path).map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Print a reply the way a customer would read it.
pub fn print_reply(reply: &AssistantReply) {
    println!("{}", reply.response);

    if let Some(reason) = reply.reason {
        println!("\n  (declined: {reason})");
    }

    if let Some(calc) = reply.calculation.as_ref().and_then(|o| o.calculation()) {
        println!();
        println!("  Prepayment:      {}", format_currency(calc.prepayment_amount));
        println!(
            "  Charges ({}%):  {}",
            format_rate(calc.prepayment_charge_percentage),
            format_currency(calc.prepayment_charge)
        );
        println!("  Total to pay:    {}", format_currency(calc.total_amount_to_pay));
        println!("  New outstanding: {}", format_currency(calc.new_outstanding));
    }
}

/// Print a reply either as JSON or as customer-facing text.
pub fn emit(reply: &AssistantReply, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
    } else {
        print_reply(reply);
    }
    Ok(())
}
