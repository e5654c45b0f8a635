use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use opentelemetry::KeyValue;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::Provider;
use crate::telemetry::metrics::{GEN_AI_CALLS, GEN_AI_ERROR_COUNT, GEN_AI_OPERATION_DURATION};

/// Process-wide count of completion calls, used for log correlation only.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicU64>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter and returns the new call number.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn total(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Text produced for one analysis slot. `degraded` marks a placeholder that
/// stands in for a failed remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub degraded: bool,
}

pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    counter: CallCounter,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn Provider>, counter: CallCounter) -> Self {
        Self { provider, counter }
    }

    pub fn counter(&self) -> &CallCounter {
        &self.counter
    }

    /// One attempt against the completion endpoint. Always yields text: any
    /// failure is logged and replaced with its placeholder.
    pub async fn complete(&self, stage: &str, prompt: &str) -> Completion {
        let call_number = self.counter.next();
        let provider_name = self.provider.name().to_string();
        let model = self.provider.model().to_string();

        tracing::info!(call = call_number, stage, "Making completion API call");

        let span = tracing::info_span!(
            "gen_ai.chat",
            otel.name = %format!("gen_ai.chat {model}"),
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = %provider_name,
            gen_ai.request.model = %model,
            gen_ai.call_number = call_number,
            report.stage = %stage,
            otel.status_code = tracing::field::Empty,
            error.type = tracing::field::Empty,
        );
        span.add_event(
            "gen_ai.user.message",
            vec![KeyValue::new("gen_ai.prompt", truncate(prompt, 1000))],
        );

        let start = Instant::now();
        let result = self.provider.complete(prompt).instrument(span.clone()).await;
        let duration = start.elapsed().as_secs_f64();

        let labels = [
            KeyValue::new("gen_ai.provider.name", provider_name),
            KeyValue::new("gen_ai.request.model", model),
            KeyValue::new("report.stage", stage.to_string()),
        ];
        GEN_AI_CALLS.add(1, &labels);
        GEN_AI_OPERATION_DURATION.record(duration, &labels);

        match result {
            Ok(content) => {
                span.add_event(
                    "gen_ai.assistant.message",
                    vec![KeyValue::new("gen_ai.completion", truncate(&content, 2000))],
                );
                Completion {
                    content,
                    degraded: false,
                }
            }
            Err(err) => {
                span.record("otel.status_code", "ERROR");
                span.record("error.type", err.error_type());

                tracing::warn!(
                    call = call_number,
                    stage,
                    error = %err,
                    "Completion call failed, substituting placeholder"
                );

                let mut error_labels = labels.to_vec();
                error_labels.push(KeyValue::new("error.type", err.error_type()));
                GEN_AI_ERROR_COUNT.add(1, &error_labels);

                Completion {
                    content: err.placeholder(),
                    degraded: true,
                }
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        s.char_indices()
            .take_while(|&(i, _)| i < max)
            .map(|(_, c)| c)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::CompletionError;

    struct FixedProvider(Result<&'static str, u16>);

    #[async_trait::async_trait]
    impl Provider for FixedProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(CompletionError::Http {
                    status,
                    body: "unavailable".to_string(),
                }),
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "fixed-model"
        }
    }

    #[tokio::test]
    async fn test_success_passes_content_through() {
        let client = CompletionClient::new(Arc::new(FixedProvider(Ok("analysis"))), CallCounter::new());
        let completion = client.complete("fund", "prompt").await;
        assert_eq!(
            completion,
            Completion {
                content: "analysis".to_string(),
                degraded: false
            }
        );
    }

    #[tokio::test]
    async fn test_failure_becomes_placeholder() {
        let client = CompletionClient::new(Arc::new(FixedProvider(Err(503))), CallCounter::new());
        let completion = client.complete("sentiment", "prompt").await;
        assert!(completion.degraded);
        assert!(completion.content.contains("503"));
    }

    #[tokio::test]
    async fn test_every_call_increments_shared_counter() {
        let counter = CallCounter::new();
        let client = CompletionClient::new(Arc::new(FixedProvider(Ok("x"))), counter.clone());
        client.complete("fund", "a").await;
        client.complete("macro", "b").await;
        assert_eq!(counter.total(), 2);
        assert_eq!(client.counter().next(), 3);
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("hello world", 5), "hello");
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let result = truncate("hé世界!", 3);
        assert!(result.len() <= 4);
        assert!(result.is_char_boundary(result.len()));
    }
}
