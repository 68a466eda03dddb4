//! OpenAI-compatible provider implementation.
//!
//! Works with: OpenAI, OpenRouter, Ollama, vLLM, llama.cpp server,
//! Together AI, Fireworks AI, and any OpenAI-compatible endpoint.

use async_trait::async_trait;
use loandesk_core::error::ProviderError;
use loandesk_core::message::{Message, Role};
use loandesk_core::provider::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// An OpenAI-compatible chat completions client.
///
/// Most hosted and local model servers expose `/v1/chat/completions`, so
/// this is the only live backend LoanDesk needs.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider with a 60s request timeout.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: http_client(Duration::from_secs(60)),
        }
    }

    /// Replace the HTTP client with one using `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Convert our Message types to OpenAI API format.
    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                }
                .to_string(),
                content: Some(m.content.clone()),
            })
            .collect()
    }

    fn request_body(request: &ProviderRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(&request.messages),
            "temperature": request.temperature,
            "stream": false,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }
}

fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

#[async_trait]
impl loandesk_core::Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::request_body(&request);

        debug!(provider = %self.name, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let choice =
            api_response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::ApiError {
                    status_code: 200,
                    message: "No choices in response".into(),
                })?;

        let usage = api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let model = if api_response.model.is_empty() {
            request.model
        } else {
            api_response.model
        };

        Ok(ProviderResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            usage,
            model,
        })
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
    #[serde(default)]
    model: String,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use loandesk_core::Provider;

    fn test_request() -> ProviderRequest {
        ProviderRequest {
            model: "gpt-3.5-turbo".into(),
            messages: vec![Message::system("rules"), Message::user("What is EMI?")],
            temperature: 0.1,
            max_tokens: Some(500),
        }
    }

    /// Serve `router` on an ephemeral port and return its `/v1` base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn status_server(status: StatusCode, body: &'static str) -> Router {
        Router::new().route(
            "/v1/chat/completions",
            post(move || async move { (status, body) }),
        )
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let provider = OpenAiCompatProvider::new("vllm", "http://gpu:8000/v1/", "");
        assert_eq!(provider.base_url(), "http://gpu:8000/v1");
    }

    #[test]
    fn message_conversion() {
        let messages = vec![Message::system("You are helpful"), Message::user("Hello")];
        let api_messages = OpenAiCompatProvider::to_api_messages(&messages);
        assert_eq!(api_messages.len(), 2);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[1].role, "user");
    }

    #[test]
    fn request_body_carries_budget() {
        let body = OpenAiCompatProvider::request_body(&test_request());
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "What is EMI?");
    }

    #[test]
    fn parse_completion_response() {
        let data = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-3.5-turbo-0125",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 1, "total_tokens": 11}
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.model, "gpt-3.5-turbo-0125");
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("Hi"));
        assert_eq!(parsed.usage.unwrap().total_tokens, 11);
    }

    #[tokio::test]
    async fn completes_against_server() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<serde_json::Value>| async move {
                let first_role = body["messages"][0]["role"].as_str().unwrap_or("").to_string();
                Json(serde_json::json!({
                    "model": "served-model",
                    "choices": [{"message": {"role": "assistant", "content": format!("first={first_role}")}}]
                }))
            }),
        );
        let provider = OpenAiCompatProvider::new("openai", serve(router).await, "sk-test");

        let response = provider.complete(test_request()).await.unwrap();
        assert_eq!(response.message.content, "first=system");
        assert_eq!(response.model, "served-model");
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let cases = [
            (StatusCode::TOO_MANY_REQUESTS, "rate"),
            (StatusCode::UNAUTHORIZED, "auth"),
            (StatusCode::FORBIDDEN, "auth"),
            (StatusCode::INTERNAL_SERVER_ERROR, "api"),
        ];

        for (status, expected) in cases {
            let base = serve(status_server(status, "nope")).await;
            let provider = OpenAiCompatProvider::new("openai", base, "sk-test");
            let err = provider.complete(test_request()).await.unwrap_err();
            let matched = match (&err, expected) {
                (ProviderError::RateLimited { .. }, "rate") => true,
                (ProviderError::AuthenticationFailed(_), "auth") => true,
                (ProviderError::ApiError { status_code, message }, "api") => {
                    *status_code == 500 && message == "nope"
                }
                _ => false,
            };
            assert!(matched, "{status} produced {err:?}");
        }
    }

    #[tokio::test]
    async fn garbage_and_empty_bodies_are_api_errors() {
        let base = serve(status_server(StatusCode::OK, "not json")).await;
        let provider = OpenAiCompatProvider::new("openai", base, "sk-test");
        assert!(matches!(
            provider.complete(test_request()).await,
            Err(ProviderError::ApiError { status_code: 200, .. })
        ));

        let base = serve(status_server(StatusCode::OK, r#"{"choices":[]}"#)).await;
        let provider = OpenAiCompatProvider::new("openai", base, "sk-test");
        assert!(matches!(
            provider.complete(test_request()).await,
            Err(ProviderError::ApiError { status_code: 200, .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = OpenAiCompatProvider::new("openai", format!("http://{addr}/v1"), "sk")
            .with_timeout(Duration::from_secs(5));
        assert!(matches!(
            provider.complete(test_request()).await,
            Err(ProviderError::Network(_))
        ));
    }

    #[tokio::test]
    async fn health_check_lists_models() {
        let router = Router::new().route("/v1/models", get(|| async { "{\"data\":[]}" }));
        let provider = OpenAiCompatProvider::new("ollama", serve(router).await, "ollama");
        assert!(provider.health_check().await.unwrap());
    }
}
