//! `loandesk search`: Query the FAQ or policy collection directly.

use clap::ValueEnum;
use loandesk_config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    Faqs,
    Policies,
}

pub fn run(
    config: &AppConfig,
    kind: SearchKind,
    query: &str,
    n: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = loandesk_gateway::build_assistant(config)?;
    let n = n.unwrap_or(config.knowledge.default_results);

    let results = match kind {
        SearchKind::Faqs => assistant.search_faqs(query, n),
        SearchKind::Policies => assistant.search_policies(query, n),
    };

    if results.is_empty() {
        println!("No results.");
    }
    for (i, result) in results.iter().enumerate() {
        println!("[{}] score {:.3}", i + 1, result.score);
        for line in result.content.lines() {
            println!("    {line}");
        }
        println!();
    }

    Ok(())
}
