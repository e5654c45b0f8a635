pub mod chat;
pub mod client;
pub mod error;
pub mod session;

pub use chat::ChatCompletionsProvider;
pub use client::{CallCounter, Completion, CompletionClient};
pub use error::CompletionError;
pub use session::CompletionSession;

#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
    fn name(&self) -> &str;
    fn model(&self) -> &str;
}
