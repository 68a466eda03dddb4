//! Provider selection: builds the response generator from config.

use crate::generator::ResponseGenerator;
use crate::openai_compat::OpenAiCompatProvider;
use loandesk_config::AppConfig;
use loandesk_core::provider::Provider;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Local model servers that accept any bearer token.
const KEYLESS_PROVIDERS: &[&str] = &["ollama", "vllm", "llamacpp"];

pub fn is_keyless(provider_name: &str) -> bool {
    KEYLESS_PROVIDERS.contains(&provider_name)
}

/// Build the configured backend, or `None` when there is no usable API key.
pub fn build_provider(config: &AppConfig) -> Option<Arc<dyn Provider>> {
    let name = config.provider.as_str();

    let api_key = match config.provider_api_key() {
        Some(key) => key,
        None if is_keyless(name) => name.to_string(),
        None => return None,
    };

    let base_url = config
        .provider_api_url()
        .unwrap_or_else(|| default_base_url(name));

    let provider = OpenAiCompatProvider::new(name, base_url, api_key)
        .with_timeout(Duration::from_secs(config.request_timeout_secs));

    Some(Arc::new(provider))
}

/// Build the response generator from configuration.
///
/// Without a backend every reply comes from the offline responder.
pub fn build_generator(config: &AppConfig) -> ResponseGenerator {
    match build_provider(config) {
        Some(provider) => {
            info!(provider = %config.provider, model = %config.model, "Text-generation backend configured");
            ResponseGenerator::new(provider, &config.model, config.temperature)
        }
        None => {
            info!(provider = %config.provider, "No API key configured; replies will come from the offline responder");
            ResponseGenerator::offline()
        }
    }
}

/// Get the default base URL for well-known providers.
pub fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "deepseek" => "https://api.deepseek.com/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "fireworks" => "https://api.fireworks.ai/inference/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" => "http://localhost:8080/v1".into(),
        _ => "https://api.openai.com/v1".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loandesk_config::ProviderConfig;

    #[test]
    fn default_base_urls() {
        assert!(default_base_url("openrouter").contains("openrouter.ai"));
        assert!(default_base_url("openai").contains("api.openai.com"));
        assert!(default_base_url("ollama").contains("localhost:11434"));
    }

    #[test]
    fn no_key_means_offline() {
        let config = AppConfig::default();
        assert!(build_provider(&config).is_none());
        assert!(!build_generator(&config).is_configured());
    }

    #[test]
    fn api_key_enables_backend() {
        let config = AppConfig {
            api_key: Some("sk-test".into()),
            ..AppConfig::default()
        };
        let generator = build_generator(&config);
        assert!(generator.is_configured());
        assert_eq!(generator.provider_name(), Some("openai"));
        assert_eq!(generator.model(), Some("gpt-3.5-turbo"));
    }

    #[test]
    fn local_providers_need_no_key() {
        for name in ["ollama", "vllm", "llamacpp"] {
            let config = AppConfig {
                provider: name.into(),
                ..AppConfig::default()
            };
            assert!(build_provider(&config).is_some(), "{name} should be keyless");
        }
    }

    #[test]
    fn provider_url_override_is_used() {
        let mut config = AppConfig {
            provider: "ollama".into(),
            ..AppConfig::default()
        };
        config.providers.insert(
            "ollama".into(),
            ProviderConfig {
                api_key: None,
                api_url: Some("http://gpu-box:11434/v1".into()),
            },
        );
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "ollama");
    }
}
