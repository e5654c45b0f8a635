use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::Instrument;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{AcceptedResponse, AnalysisRequest, AnalysisResponse};
use crate::pipeline::{Orchestrator, validate_instrument_name};
use crate::tasks::{TaskRecord, TaskStore};
use crate::telemetry::metrics::ANALYSIS_ASYNC_ACCEPTED;

fn request_body(payload: Result<Json<AnalysisRequest>, JsonRejection>) -> AppResult<AnalysisRequest> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> AppResult<Json<AnalysisResponse>> {
    let body = request_body(payload)?;
    let analysis = state.orchestrator.analyze(body.instrument_name()).await?;
    Ok(Json(AnalysisResponse::from(analysis)))
}

pub async fn analyze_async(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AcceptedResponse>)> {
    let body = request_body(payload)?;
    let fund_name = validate_instrument_name(body.instrument_name())?;

    let record = state.tasks.insert_pending(&fund_name).await;
    ANALYSIS_ASYNC_ACCEPTED.add(1, &[]);

    let span = tracing::info_span!(
        "background analysis",
        task.id = %record.task_id,
        fund.name = %fund_name,
    );
    tokio::spawn(
        run_background_analysis(
            state.orchestrator.clone(),
            state.tasks.clone(),
            record.task_id.clone(),
            fund_name.clone(),
        )
        .instrument(span),
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(AcceptedResponse {
            status: "accepted".to_string(),
            task_id: record.task_id,
            fund_name,
            message: "Analysis started. Poll the task endpoint for the result.".to_string(),
        }),
    ))
}

async fn run_background_analysis(
    orchestrator: Orchestrator,
    tasks: TaskStore,
    task_id: String,
    fund_name: String,
) {
    tracing::info!("Background analysis started");

    match orchestrator.analyze(&fund_name).await {
        Ok(analysis) => {
            tasks.complete(&task_id, analysis).await;
            tracing::info!("Background analysis completed");
        }
        Err(e) => {
            tracing::error!(error = %e, "Background analysis failed");
            tasks.fail(&task_id, e.message().to_string()).await;
        }
    }
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<Json<TaskRecord>> {
    state
        .tasks
        .get(&task_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Task {task_id} not found")))
}
