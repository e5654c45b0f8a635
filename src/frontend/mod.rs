//! Terminal client for the analysis service.

pub mod api;
pub mod download;
pub mod progress;
pub mod render;
pub mod view;

pub use api::{AnalysisApi, ClientError, TROUBLESHOOTING};
pub use render::{ReportLayout, ReportSection, format_markdown, split_report};

use crate::models::AnalysisResponse;

/// One analysis session: nothing submitted, waiting on the server, or finished.
#[derive(Debug, Default)]
pub enum ClientState {
    #[default]
    Idle,
    InFlight { fund_name: String },
    Done(Result<AnalysisResponse, ClientError>),
}

impl ClientState {
    /// Submission needs a non-blank name and no request already running.
    pub fn can_submit(&self, input: &str) -> bool {
        !input.trim().is_empty() && !matches!(self, ClientState::InFlight { .. })
    }

    /// Moves to `InFlight`, returning the trimmed name, or `None` if the
    /// submission is not allowed.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        if !self.can_submit(input) {
            return None;
        }
        let fund_name = input.trim().to_string();
        *self = ClientState::InFlight {
            fund_name: fund_name.clone(),
        };
        Some(fund_name)
    }

    pub fn finish(&mut self, outcome: Result<AnalysisResponse, ClientError>) {
        *self = ClientState::Done(outcome);
    }

    pub fn response(&self) -> Option<&AnalysisResponse> {
        match self {
            ClientState::Done(Ok(response)) => Some(response),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = ClientState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_cannot_submit() {
        let mut state = ClientState::default();
        assert!(!state.can_submit("   "));
        assert!(state.submit("").is_none());
        assert!(matches!(state, ClientState::Idle));
    }

    #[test]
    fn test_submit_moves_to_in_flight() {
        let mut state = ClientState::Idle;
        assert_eq!(state.submit("  SBI Small Cap Fund ").as_deref(), Some("SBI Small Cap Fund"));
        assert!(matches!(&state, ClientState::InFlight { fund_name } if fund_name == "SBI Small Cap Fund"));
        assert!(state.submit("Another Fund").is_none());
    }

    #[test]
    fn test_failed_outcome_has_no_response() {
        let mut state = ClientState::Idle;
        state.submit("Axis Bluechip Fund");
        state.finish(Err(ClientError::Timeout));
        assert!(state.response().is_none());
        assert!(state.can_submit("Axis Bluechip Fund"));

        state.reset();
        assert!(matches!(state, ClientState::Idle));
    }
}
