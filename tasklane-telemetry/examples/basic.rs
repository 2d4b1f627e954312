#![expect(missing_docs, reason = "example")]

use std::sync::Arc;

use tasklane_telemetry::{
    ConsolePrettyExporter, ErrorDetails, FilteredTaskLogger, LogLevel, SpanOptions, TaskLogger,
    TaskLoggerConfig, Tracer, properties,
};

fn main() {
    let exporter = Arc::new(ConsolePrettyExporter::DEFAULT);
    let logger = FilteredTaskLogger::new(TaskLoggerConfig {
        level: LogLevel::Info,
        exporter: exporter.clone(),
        tracer: Tracer::new(exporter),
    });

    logger.info(
        "task started",
        Some(&properties! { attempt = 1, queue = "default" }),
    );
    logger.debug("dropped, the level is info", None);

    let result = logger.trace(
        "resize_image",
        |span| {
            span.add_event("image_loaded", Default::default());
            std::thread::sleep(std::time::Duration::from_millis(10));
            Ok::<_, std::io::Error>(1024)
        },
        SpanOptions::default(),
    );

    match result {
        Ok(bytes) => logger.log("resized", Some(&properties! { bytes = bytes })),
        Err(error) => logger.error(
            "resize failed",
            Some(&properties! { err = ErrorDetails::from_error(&error) }),
        ),
    }
}
