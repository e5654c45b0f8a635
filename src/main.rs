use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, StatusCode};
use axum::middleware;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use fund_analysis::llm::{CallCounter, ChatCompletionsProvider, CompletionClient, CompletionSession};
use fund_analysis::pipeline::Orchestrator;
use fund_analysis::tasks::TaskStore;
use fund_analysis::telemetry::{
    HttpMakeSpan, HttpOnResponse, X_REQUEST_ID, init_telemetry, record_http_metrics,
};
use fund_analysis::{AppState, Config, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let telemetry_guard = init_telemetry(&config)?;

    tracing::info!(
        port = config.port,
        environment = %config.environment,
        "Starting Mutual Fund Analysis API"
    );
    tracing::info!(
        api_key_configured = config.api_key.is_some(),
        endpoint = %config.completion.url,
        model = %config.completion.model,
        "Completion API configured"
    );

    let session = Arc::new(CompletionSession::new(config.completion.timeout()));
    let provider = ChatCompletionsProvider::new(
        Arc::clone(&session),
        &config.completion,
        config.api_key.as_deref(),
    );
    let counter = CallCounter::new();
    let client = CompletionClient::new(Arc::new(provider), counter.clone());

    let state = AppState {
        orchestrator: Orchestrator::new(Arc::new(client)),
        tasks: TaskStore::new(config.task_store_capacity),
    };

    let app = routes::create_router(state)
        .layer(middleware::from_fn(record_http_metrics))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(HttpMakeSpan)
                .on_response(HttpOnResponse),
        )
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(X_REQUEST_ID),
            MakeRequestUuid,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    session.close();
    tracing::info!(
        completion_calls = counter.total(),
        "Shutting down Mutual Fund Analysis API"
    );
    telemetry_guard.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
