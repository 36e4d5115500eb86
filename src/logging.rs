//! Console output for the renderer's tracing events.
//!
//! The renderer only emits events; nothing is printed unless a subscriber is installed.
//! Applications that have no subscriber of their own can call [`install_tracing`].

use std::io::{self, Write};
use std::sync::Once;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::fmt::{self, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const TRACING_PREFIX: &str = "[tidepool]";
const DEFAULT_FILTER: &str = "info";

static TRACING_INSTALLED: Once = Once::new();

/// Install a stderr subscriber for renderer events (idempotent).
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Use
/// `RUST_LOG=tidepool=trace` to see every reconciliation step.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let console = fmt::layer()
            .event_format(CompactFormatter)
            .with_writer(PrefixedWriter)
            .with_ansi(false)
            .with_filter(filter);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("{TRACING_PREFIX} a global tracing subscriber is already installed");
        }
    });
}

#[derive(Clone, Default)]
struct PrefixedWriter;

impl<'a> MakeWriter<'a> for PrefixedWriter {
    type Writer = PrefixedWriterInner<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        PrefixedWriterInner {
            inner: io::stderr(),
            wrote_prefix: false,
        }
    }
}

struct PrefixedWriterInner<W> {
    inner: W,
    wrote_prefix: bool,
}

impl<W: Write> Write for PrefixedWriterInner<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.wrote_prefix {
            self.inner.write_all(TRACING_PREFIX.as_bytes())?;
            self.inner.write_all(b" ")?;
            self.wrote_prefix = true;
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `LEVEL target{span}: fields`, one line per event.
#[derive(Clone, Default)]
struct CompactFormatter;

impl<S, N> FormatEvent<S, N> for CompactFormatter
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let level = event.metadata().level();
        let target = event.metadata().target();
        write!(writer, "{level} {target}")?;
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, ":{}", span.name())?;
            }
        }
        write!(writer, ": ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_written_once_per_event() {
        let mut writer = PrefixedWriterInner {
            inner: Vec::new(),
            wrote_prefix: false,
        };
        writer.write_all(b"INFO a: one").unwrap();
        writer.write_all(b" two\n").unwrap();
        assert_eq!(
            String::from_utf8(writer.inner).unwrap(),
            "[tidepool] INFO a: one two\n"
        );
    }

    #[test]
    fn install_is_idempotent() {
        install_tracing();
        install_tracing();
        tracing::info!("logging installed");
    }
}
