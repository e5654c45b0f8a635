use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::CompletionError;

/// Outbound HTTP session shared by every completion call.
///
/// The underlying `reqwest::Client` is built on first use and reused for all
/// later calls; [`CompletionSession::close`] drops it (and its pooled
/// connections) on shutdown. A call issued after `close` opens a new one.
pub struct CompletionSession {
    timeout: Duration,
    client: Mutex<Option<reqwest::Client>>,
}

impl CompletionSession {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: Mutex::new(None),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn slot(&self) -> MutexGuard<'_, Option<reqwest::Client>> {
        self.client.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn client(&self) -> Result<reqwest::Client, CompletionError> {
        let mut slot = self.slot();
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        tracing::debug!(timeout_secs = self.timeout.as_secs(), "Completion session opened");
        *slot = Some(client.clone());
        Ok(client)
    }

    pub fn is_open(&self) -> bool {
        self.slot().is_some()
    }

    pub fn close(&self) {
        if self.slot().take().is_some() {
            tracing::info!("Completion session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_is_lazy() {
        let session = CompletionSession::new(Duration::from_secs(5));
        assert!(!session.is_open());
        session.client().unwrap();
        assert!(session.is_open());
        assert_eq!(session.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_close_releases_and_reopens() {
        let session = CompletionSession::new(Duration::from_secs(5));
        session.client().unwrap();
        session.close();
        assert!(!session.is_open());

        // closing twice is a no-op
        session.close();

        session.client().unwrap();
        assert!(session.is_open());
    }
}
