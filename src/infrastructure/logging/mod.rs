//! Logging infrastructure
//!
//! Structured logging via tracing and tracing-subscriber, with sensitive
//! values redacted from every formatted line before it reaches stderr.

pub mod redact;

pub use redact::SensitiveRedactor;

use std::io::{self, Write};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter.
pub const ENV_LOG_FILTER: &str = "MODULAR_CLI_SDK_LOG";

/// Writer handle that redacts each buffer before forwarding it to stderr.
#[derive(Debug)]
pub struct RedactingStderr;

impl Write for RedactingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        let redacted = redact::redactor().redact(&line);
        io::stderr().write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Writer factory applying the [`SensitiveRedactor`] to each formatted
/// line on its way to stderr.
#[derive(Debug, Clone, Default)]
pub struct RedactingWriter;

impl<'a> MakeWriter<'a> for RedactingWriter {
    type Writer = RedactingStderr;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingStderr
    }
}

/// Install the default subscriber: env-filtered (default `info`), plain
/// formatting, redacted stderr output.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(RedactingWriter),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacting_writer_reports_full_buffer_consumed() {
        let line = br#"{"password": "hunter2"}"#;
        let written = RedactingStderr.write(line).unwrap();
        assert_eq!(written, line.len());
    }

    #[test]
    fn test_init_logging_is_reentrant() {
        init_logging();
        init_logging();
    }
}
