use std::sync::Arc;
use std::time::Instant;

use opentelemetry::KeyValue;
use tokio::task::{JoinError, JoinHandle};
use tracing::Instrument;

use crate::error::{AppError, AppResult};
use crate::llm::{Completion, CompletionClient};
use crate::telemetry::metrics::{ANALYSIS_DEGRADED_FIELDS, ANALYSIS_DURATION};

use super::prompts;
use super::report::{Analysis, AnalysisField};

pub const MIN_NAME_LEN: usize = 3;

/// Trims the name and enforces the minimum length.
pub fn validate_instrument_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(AppError::Validation(
            "Mutual fund name is required".to_string(),
        ));
    }

    if name.chars().count() < MIN_NAME_LEN {
        return Err(AppError::Validation(
            "Fund name too short. Please provide the complete fund name.".to_string(),
        ));
    }

    Ok(name.to_string())
}

#[derive(Clone)]
pub struct Orchestrator {
    client: Arc<CompletionClient>,
}

impl Orchestrator {
    pub fn new(client: Arc<CompletionClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(
        name = "pipeline analysis",
        skip_all,
        fields(
            fund.name = %instrument_name.trim(),
            analysis.degraded_fields,
            analysis.duration_ms,
        )
    )]
    pub async fn analyze(&self, instrument_name: &str) -> AppResult<Analysis> {
        let fund_name = validate_instrument_name(instrument_name)?;
        let start = Instant::now();

        tracing::info!(fund_name = %fund_name, "Starting analysis");

        let (fund, sentiment, macro_) = self.gather(&fund_name).await?;

        let report = self
            .compile(&fund_name, &fund.content, &sentiment.content, &macro_.content)
            .await;

        let analysis = Analysis::from_slots(fund_name, fund, sentiment, macro_, report);

        let duration = start.elapsed();
        let degraded = analysis.degraded_fields.len();
        let outcome = if degraded == 0 { "complete" } else { "degraded" };

        ANALYSIS_DURATION.record(
            duration.as_secs_f64(),
            &[KeyValue::new("analysis.outcome", outcome)],
        );
        ANALYSIS_DEGRADED_FIELDS.record(degraded as f64, &[]);

        let span = tracing::Span::current();
        span.record("analysis.degraded_fields", degraded);
        span.record("analysis.duration_ms", duration.as_millis() as u64);

        tracing::info!(
            fund_name = %analysis.fund_name,
            degraded_fields = degraded,
            "Analysis completed"
        );

        Ok(analysis)
    }

    /// Runs the three independent analyses concurrently and waits for all of
    /// them. Each slot resolves to text or a placeholder; only a task that
    /// could not be joined fails the whole analysis.
    async fn gather(&self, fund_name: &str) -> AppResult<(Completion, Completion, Completion)> {
        let fund = self.spawn_stage(AnalysisField::FundAnalysis, prompts::fund_analysis(fund_name));
        let sentiment = self.spawn_stage(
            AnalysisField::SentimentAnalysis,
            prompts::sentiment_analysis(fund_name),
        );
        let macro_ = self.spawn_stage(
            AnalysisField::MacroAnalysis,
            prompts::macro_analysis(fund_name),
        );

        let (fund, sentiment, macro_) = tokio::join!(fund, sentiment, macro_);

        Ok((
            joined(AnalysisField::FundAnalysis, fund)?,
            joined(AnalysisField::SentimentAnalysis, sentiment)?,
            joined(AnalysisField::MacroAnalysis, macro_)?,
        ))
    }

    fn spawn_stage(&self, field: AnalysisField, prompt: String) -> JoinHandle<Completion> {
        let client = Arc::clone(&self.client);
        tokio::spawn(
            async move { client.complete(field.as_str(), &prompt).await }.in_current_span(),
        )
    }

    /// Synthesis call. Always runs, whatever the three inputs contain.
    pub async fn compile(
        &self,
        fund_name: &str,
        fund_analysis: &str,
        sentiment_analysis: &str,
        macro_analysis: &str,
    ) -> Completion {
        let prompt = prompts::synthesis(fund_name, fund_analysis, sentiment_analysis, macro_analysis);
        self.client
            .complete(AnalysisField::FinalReport.as_str(), &prompt)
            .await
    }
}

fn joined(field: AnalysisField, result: Result<Completion, JoinError>) -> AppResult<Completion> {
    result.map_err(|e| {
        tracing::error!(stage = field.as_str(), error = %e, "Analysis task failed");
        AppError::Internal(format!("Analysis failed: {} task {e}", field.as_str()))
    })
}
