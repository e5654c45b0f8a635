use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{CompletionError, CompletionSession, Provider};
use crate::config::CompletionConfig;

/// OpenAI-compatible `chat/completions` endpoint (Perplexity by default).
pub struct ChatCompletionsProvider {
    session: Arc<CompletionSession>,
    url: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl ChatCompletionsProvider {
    pub fn new(
        session: Arc<CompletionSession>,
        config: &CompletionConfig,
        api_key: Option<&str>,
    ) -> Self {
        Self {
            session,
            url: config.url.clone(),
            api_key: api_key.unwrap_or_default().to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait::async_trait]
impl Provider for ChatCompletionsProvider {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let client = self.session.client()?;
        let timeout = self.session.timeout();

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(
                http.response.status_code = status.as_u16(),
                body = %error_body,
                "Completion API error"
            );
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::from_reqwest(e, timeout))?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::MalformedResponse("response contained no completion".to_string())
            })
    }

    fn name(&self) -> &str {
        "perplexity"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
