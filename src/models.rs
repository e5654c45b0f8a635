//! Request and response bodies of the HTTP API, shared by the server routes
//! and the terminal client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::{Analysis, AnalysisField, AnalysisResult};

pub const SERVICE_NAME: &str = "Mutual Fund Analysis API";

pub const POPULAR_FUNDS: [&str; 5] = [
    "HDFC Mid-Cap Opportunities Fund - Growth Option - Direct Plan",
    "SBI Small Cap Fund - Direct Plan - Growth",
    "Axis Bluechip Fund - Direct Plan - Growth",
    "Mirae Asset Large Cap Fund - Direct Plan - Growth",
    "Parag Parikh Long Term Equity Fund - Direct Plan - Growth",
];

/// `null` and a missing field both read as an empty name, so validation
/// reports them as "required".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default, rename = "instrumentName", alias = "mutual_fund_name")]
    pub instrument_name: Option<String>,
}

impl AnalysisRequest {
    pub fn new(instrument_name: &str) -> Self {
        Self {
            instrument_name: Some(instrument_name.to_string()),
        }
    }

    pub fn instrument_name(&self) -> &str {
        self.instrument_name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    pub fund_name: String,
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub degraded_fields: Vec<AnalysisField>,
    pub timestamp: DateTime<Utc>,
}

impl From<Analysis> for AnalysisResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            status: "success".to_string(),
            fund_name: analysis.fund_name,
            analysis: analysis.result,
            degraded_fields: analysis.degraded_fields,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedResponse {
    pub status: String,
    pub task_id: String,
    pub fund_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_both_field_names() {
        let body: AnalysisRequest =
            serde_json::from_str(r#"{"instrumentName": "HDFC Top 100 Fund"}"#).unwrap();
        assert_eq!(body.instrument_name(), "HDFC Top 100 Fund");

        let body: AnalysisRequest =
            serde_json::from_str(r#"{"mutual_fund_name": "SBI Small Cap Fund"}"#).unwrap();
        assert_eq!(body.instrument_name(), "SBI Small Cap Fund");
    }

    #[test]
    fn test_request_missing_name_is_empty() {
        let body: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert!(body.instrument_name().is_empty());
    }

    #[test]
    fn test_request_null_name_is_empty() {
        let body: AnalysisRequest =
            serde_json::from_str(r#"{"instrumentName": null}"#).unwrap();
        assert_eq!(body.instrument_name(), "");
    }

    #[test]
    fn test_request_serializes_wire_name() {
        let value = serde_json::to_value(AnalysisRequest::new("Axis Bluechip Fund")).unwrap();
        assert_eq!(value, serde_json::json!({"instrumentName": "Axis Bluechip Fund"}));
    }

    #[test]
    fn test_response_from_analysis() {
        let response = AnalysisResponse::from(Analysis {
            fund_name: "HDFC Top 100 Fund".to_string(),
            result: AnalysisResult {
                fund_analysis: "f".to_string(),
                sentiment_analysis: "s".to_string(),
                macro_analysis: "m".to_string(),
                final_report: "r".to_string(),
            },
            degraded_fields: vec![],
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["fund_name"], "HDFC Top 100 Fund");
        assert_eq!(value["analysis"]["finalReport"], "r");
        let timestamp = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}
