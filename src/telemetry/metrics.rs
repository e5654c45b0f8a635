use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::LazyLock;

pub static METER: LazyLock<Meter> = LazyLock::new(|| global::meter("fund-analysis-service"));

// --- Completion API ---

pub static GEN_AI_CALLS: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("gen_ai.client.calls")
        .with_description("Number of completion API calls issued")
        .with_unit("{call}")
        .build()
});

pub static GEN_AI_OPERATION_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("gen_ai.client.operation.duration")
        .with_description("Duration of completion API calls in seconds")
        .with_unit("s")
        .build()
});

pub static GEN_AI_ERROR_COUNT: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("gen_ai.client.error.count")
        .with_description("Number of completion API calls replaced by a placeholder")
        .with_unit("{error}")
        .build()
});

// --- Domain Metrics ---

pub static ANALYSIS_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("analysis.duration")
        .with_description("Total duration of one fund analysis in seconds")
        .with_unit("s")
        .build()
});

pub static ANALYSIS_DEGRADED_FIELDS: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("analysis.degraded_fields")
        .with_description("Number of analysis fields holding a placeholder")
        .with_unit("{field}")
        .build()
});

pub static ANALYSIS_ASYNC_ACCEPTED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("analysis.async.accepted")
        .with_description("Number of background analyses accepted")
        .with_unit("{task}")
        .build()
});

// --- HTTP Metrics ---

pub static HTTP_REQUESTS_TOTAL: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("http.requests.total")
        .with_description("Total number of HTTP requests")
        .with_unit("{request}")
        .build()
});

pub static HTTP_REQUEST_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("http.request.duration")
        .with_description("HTTP request duration in milliseconds")
        .with_unit("ms")
        .with_boundaries(vec![
            10.0, 100.0, 1000.0, 5000.0, 15000.0, 30000.0, 60000.0, 120000.0, 300000.0, 600000.0,
        ])
        .build()
});
