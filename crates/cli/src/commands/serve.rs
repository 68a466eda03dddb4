//! `loandesk serve`: Start the HTTP API server.

use loandesk_config::AppConfig;

pub async fn run(
    mut config: AppConfig,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("LoanDesk Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   Generator: {}",
        if config.has_api_key() || loandesk_providers::router::is_keyless(&config.provider) {
            config.provider.as_str()
        } else {
            "offline"
        }
    );

    loandesk_gateway::start(config).await?;

    Ok(())
}
