//! Response generator: a configured backend with an offline fallback.
//!
//! `generate` never fails: a missing backend or any provider error is
//! answered by the offline responder, and the outcome records which source
//! produced the text.

use crate::instructions::SYSTEM_PROMPT;
use crate::offline;
use loandesk_core::error::ProviderError;
use loandesk_core::message::Message;
use loandesk_core::provider::{Provider, ProviderRequest, ProviderResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Which source produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSource {
    Model,
    Offline,
}

/// Outcome of [`ResponseGenerator::generate`].
#[derive(Debug, Clone)]
pub enum Generation {
    /// The backend answered.
    Model { text: String, model: String },
    /// The offline responder answered; `cause` is the backend error, if any.
    Offline {
        text: String,
        cause: Option<ProviderError>,
    },
}

impl Generation {
    pub fn text(&self) -> &str {
        match self {
            Self::Model { text, .. } | Self::Offline { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Model { text, .. } | Self::Offline { text, .. } => text,
        }
    }

    pub fn source(&self) -> GenerationSource {
        match self {
            Self::Model { .. } => GenerationSource::Model,
            Self::Offline { .. } => GenerationSource::Offline,
        }
    }
}

struct Backend {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
}

/// Turns composed prompts into reply text.
pub struct ResponseGenerator {
    backend: Option<Backend>,
    system_prompt: String,
}

impl ResponseGenerator {
    /// A generator backed by `provider`.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            backend: Some(Backend {
                provider,
                model: model.into(),
                temperature,
            }),
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    /// A generator that always answers offline.
    pub fn offline() -> Self {
        Self {
            backend: None,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.backend.as_ref().map(|b| b.provider.name())
    }

    pub fn model(&self) -> Option<&str> {
        self.backend.as_ref().map(|b| b.model.as_str())
    }

    async fn call_backend(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<ProviderResponse, ProviderError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("no text-generation backend".into()))?;

        let request = ProviderRequest {
            model: backend.model.clone(),
            messages: vec![Message::system(&self.system_prompt), Message::user(prompt)],
            temperature: backend.temperature,
            max_tokens: Some(max_tokens),
        };

        backend.provider.complete(request).await
    }

    /// Backend reply as `(trimmed text, responding model)`.
    async fn reply(&self, prompt: &str, max_tokens: u32) -> Result<(String, String), ProviderError> {
        let response = self.call_backend(prompt, max_tokens).await?;
        let text = response.message.content.trim();
        if text.is_empty() {
            return Err(ProviderError::ApiError {
                status_code: 200,
                message: "Empty completion".into(),
            });
        }
        Ok((text.to_string(), response.model))
    }

    /// Generate a reply, falling back to the offline responder.
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> Generation {
        let Some(backend) = &self.backend else {
            debug!("No backend configured; answering offline");
            return Generation::Offline {
                text: offline::respond(prompt),
                cause: None,
            };
        };

        match self.reply(prompt, max_tokens).await {
            Ok((text, model)) => {
                debug!(provider = backend.provider.name(), model = %model, "Backend answered");
                Generation::Model { text, model }
            }
            Err(e) => {
                warn!(
                    provider = backend.provider.name(),
                    error = %e,
                    "Backend failed; answering offline"
                );
                Generation::Offline {
                    text: offline::respond(prompt),
                    cause: Some(e),
                }
            }
        }
    }
}

impl std::fmt::Debug for ResponseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseGenerator")
            .field("provider", &self.provider_name())
            .field("model", &self.model())
            .finish()
    }
}
