use std::time::Duration;

use thiserror::Error;

use crate::models::{AnalysisRequest, AnalysisResponse};

pub const TROUBLESHOOTING: &str = "\
Common Issues and Solutions:

1. Connection Error: make sure the analysis server is running:
       cargo run --bin server

2. Timeout Error: the analysis takes time. Try a shorter fund name or check your internet connection.

3. API Error: verify the API is up by visiting <api-url>/health

4. Fund Name: use the complete official fund name.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(
        "Connection Error: Unable to connect to the API server at {url}. Please ensure the analysis server is running."
    )]
    Connection { url: String },

    #[error("Timeout Error: The analysis is taking longer than expected. Please try again.")]
    Timeout,

    #[error("API Error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response from the API: {0}")]
    InvalidResponse(String),

    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

/// HTTP client for the analysis server's synchronous endpoint.
pub struct AnalysisApi {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Unexpected(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(name = "client analyze", skip(self))]
    pub async fn analyze(&self, fund_name: &str) -> Result<AnalysisResponse, ClientError> {
        let url = format!("{}/analyze", self.base_url);
        let body = AnalysisRequest::new(fund_name);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Analysis API returned an error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AnalysisResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else {
                ClientError::InvalidResponse(e.to_string())
            }
        })?;

        if parsed.status != "success" {
            return Err(ClientError::InvalidResponse(format!(
                "status was {:?}",
                parsed.status
            )));
        }

        Ok(parsed)
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection {
                url: self.base_url.clone(),
            }
        } else {
            ClientError::Unexpected(err.to_string())
        }
    }
}
