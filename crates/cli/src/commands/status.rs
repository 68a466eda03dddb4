//! `loandesk status`: Show the effective configuration.

use loandesk_config::AppConfig;
use loandesk_core::Provider;
use std::path::Path;
use std::sync::Arc;

/// One-line reachability report for the configured backend.
pub async fn backend_status(provider: Option<Arc<dyn Provider>>) -> String {
    let Some(provider) = provider else {
        return "offline responder (no API key)".to_string();
    };
    match provider.health_check().await {
        Ok(true) => format!("{} reachable", provider.name()),
        Ok(false) => format!("{} responded with an error", provider.name()),
        Err(e) => format!("{} unreachable ({e})", provider.name()),
    }
}

pub async fn run(config: &AppConfig, config_path: Option<&Path>) {
    let default_path = AppConfig::config_dir().join("config.toml");
    let path = config_path.unwrap_or(&default_path);

    println!("LoanDesk Status");
    println!("===============");
    println!("  Config file:  {}", path.display());
    println!("  Provider:     {}", config.provider);
    println!("  Model:        {}", config.model);
    println!("  Temperature:  {}", config.temperature);
    println!(
        "  Max tokens:   {} (calculations: {})",
        config.max_tokens, config.calculation_max_tokens
    );
    println!(
        "  API key:      {}",
        if config.has_api_key() { "set (redacted)" } else { "not set" }
    );
    if let Some(url) = config.provider_api_url() {
        println!("  API URL:      {url}");
    }
    println!(
        "  Backend:      {}",
        backend_status(loandesk_providers::build_provider(config)).await
    );
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "  Corpus:       {}",
        config
            .knowledge
            .corpus_path
            .as_deref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
    );
    println!(
        "  Customers:    {}",
        config
            .bank
            .fixtures_path
            .as_deref()
            .map_or_else(|| "demo data".to_string(), |p| p.display().to_string())
    );

    if path.exists() {
        println!("\n  Config file found");
    } else {
        println!("\n  No config file, using defaults. A starting point:\n");
        println!("{}", AppConfig::default_toml());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use loandesk_core::error::ProviderError;
    use loandesk_core::provider::{ProviderRequest, ProviderResponse};

    struct StubProvider(Result<bool, ProviderError>);

    #[async_trait]
    impl Provider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            Err(ProviderError::NotConfigured("stub".into()))
        }

        async fn health_check(&self) -> Result<bool, ProviderError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn backend_status_reports_health() {
        assert_eq!(
            backend_status(None).await,
            "offline responder (no API key)"
        );
        assert_eq!(
            backend_status(Some(Arc::new(StubProvider(Ok(true))))).await,
            "stub reachable"
        );
        assert_eq!(
            backend_status(Some(Arc::new(StubProvider(Ok(false))))).await,
            "stub responded with an error"
        );
        let down = StubProvider(Err(ProviderError::Network("refused".into())));
        assert!(
            backend_status(Some(Arc::new(down)))
                .await
                .starts_with("stub unreachable")
        );
    }
}
