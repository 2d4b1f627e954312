use super::{ExportLogs, ExportSpans};
use crate::protocol::{LogRecord, SpanMessage};

/// Exporter that pretty prints log records to stderr.
///
/// Span messages are ignored; this exporter is meant for watching a task's
/// log output during local runs, not for reconstructing traces.
///
/// <div class="warning">
/// Only intended for experimentation and examples.
/// </div>
#[derive(Debug, Default)]
pub struct ConsolePrettyExporter(());

impl ConsolePrettyExporter {
    /// A `const` version of `ConsolePrettyExporter::default()` to allow use as a `&'static`.
    pub const DEFAULT: Self = ConsolePrettyExporter(());
}

impl ExportLogs for ConsolePrettyExporter {
    fn emit(&self, record: LogRecord<'_>) {
        format_record(&record, std::io::stderr());
    }
}

impl ExportSpans for ConsolePrettyExporter {
    fn export(&self, _message: SpanMessage<'_>) {}
}

fn format_record(record: &LogRecord<'_>, mut output: impl std::io::Write) {
    // Millisecond accuracy is probably enough for a console logger.
    let time = record.timestamp.as_nanos() / 1_000_000;

    let attributes = if record.attributes.is_empty() {
        String::new()
    } else {
        let mut attributes =
            record
                .attributes
                .iter()
                .fold(String::from(" ["), |mut formatted, (key, value)| {
                    use std::fmt::Write;
                    write!(formatted, "{key}: {value}, ").unwrap();
                    formatted
                });
        // Remove trailing `, `.
        attributes.truncate(attributes.len() - 2);
        attributes + "]"
    };

    let severity = record.severity_text();

    // Severity is up to 5 characters, pad it to stay consistent. Unix time in
    // milliseconds is 13 digits wide until 2286.
    let _ = writeln!(
        output,
        "[{severity:>5}:{time:13}] {body}{attributes}",
        body = record.body
    );
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::Timestamp;
    use crate::protocol::Severity;
    use crate::value::{AttributeValue, Attributes};

    #[test]
    fn smoke_test() {
        let mut output = Vec::new();

        let ns = 1_000_000_000u64;
        let mut attributes = Attributes::new();
        attributes.insert("attempt".to_owned(), AttributeValue::from(2));
        attributes.insert("queue".to_owned(), AttributeValue::from("default"));

        let records = [
            (1729000000 * ns, Severity::Debug, "resolving task", Attributes::new()),
            (1729000001 * ns, Severity::Log, "plain output", Attributes::new()),
            (1729000002 * ns, Severity::Info, "task started", attributes),
            (1729000060 * ns, Severity::Warn, "running late", Attributes::new()),
            (1729000061 * ns, Severity::Error, "task failed", Attributes::new()),
        ];

        for (nanos, severity, body, attributes) in records {
            format_record(
                &LogRecord::new(severity, body, attributes, Timestamp(nanos)),
                &mut output,
            );
        }

        assert_eq!(
            str::from_utf8(&output).unwrap(),
            indoc! { r#"
                [debug:1729000000000] resolving task
                [  log:1729000001000] plain output
                [ info:1729000002000] task started [attempt: 2, queue: "default"]
                [ warn:1729000060000] running late
                [error:1729000061000] task failed
            "# }
        );
    }
}
