#![expect(missing_docs, reason = "example")]

use std::sync::Arc;
use std::time::Duration;

use tasklane_telemetry::future::FutureExt;
use tasklane_telemetry::{
    ConsoleJsonExporter, FilteredTaskLogger, LogLevel, SpanOptions, TaskLogger, TaskLoggerConfig,
    Tracer, properties,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exporter = Arc::new(ConsoleJsonExporter::DEFAULT);
    let logger = FilteredTaskLogger::new(TaskLoggerConfig {
        level: LogLevel::Debug,
        exporter: exporter.clone(),
        tracer: Tracer::new(exporter),
    });

    logger.info("starting async steps", None);

    let span = logger.start_span("step_a", SpanOptions::default());
    step(&logger, "a").in_span(span).await;

    let span = logger.start_span("step_b", SpanOptions::default());
    step(&logger, "b").in_span(span).await;
}

async fn step(logger: &FilteredTaskLogger, name: &str) {
    logger.debug("step running", Some(&properties! { step = name }));
    tokio::time::sleep(Duration::from_millis(10)).await;
    logger.debug("step finished", Some(&properties! { step = name }));
}
