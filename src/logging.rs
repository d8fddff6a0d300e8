//! Log routing: `tracing` events formatted as one line each and handed to a sink
//!
//! The browser build installs a sink that writes to the devtools console,
//! picking `console.error`/`console.warn`/`console.log` from the level.

use std::io;

use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;

/// [`MakeWriter`] that buffers each event and passes the finished line to `sink`
pub struct SinkWriter<F: Fn(Level, &str)> {
    sink: F,
}

impl<F: Fn(Level, &str)> SinkWriter<F> {
    pub fn new(sink: F) -> Self {
        Self { sink }
    }

    fn line(&self, level: Level) -> SinkLine<'_, F> {
        SinkLine {
            sink: &self.sink,
            level,
            buf: Vec::new(),
        }
    }
}

pub struct SinkLine<'a, F: Fn(Level, &str)> {
    sink: &'a F,
    level: Level,
    buf: Vec<u8>,
}

impl<F: Fn(Level, &str)> io::Write for SinkLine<'_, F> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<F: Fn(Level, &str)> Drop for SinkLine<'_, F> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        (self.sink)(self.level, line.trim_end());
    }
}

impl<'a, F: Fn(Level, &str) + 'a> MakeWriter<'a> for SinkWriter<F> {
    type Writer = SinkLine<'a, F>;

    fn make_writer(&'a self) -> Self::Writer {
        self.line(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.line(*meta.level())
    }
}

/// Subscriber writing plain (no time, no ANSI) lines at `max_level` and above
pub fn subscriber<F>(sink: F, max_level: LevelFilter) -> impl Subscriber + Send + Sync + 'static
where
    F: Fn(Level, &str) + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(max_level).with(
        fmt::layer()
            .with_writer(SinkWriter::new(sink))
            .with_target(true)
            .with_ansi(false)
            .without_time(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, WordRepository};
    use futures::executor::block_on;
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(Level, String)>>>;

    fn capture() -> (Captured, impl Subscriber + Send + Sync + 'static) {
        let lines: Captured = Arc::new(Mutex::new(Vec::new()));
        let sink_lines = lines.clone();
        let subscriber = subscriber(
            move |level: Level, line: &str| {
                sink_lines.lock().unwrap().push((level, line.to_string()));
            },
            LevelFilter::INFO,
        );
        (lines, subscriber)
    }

    #[test]
    fn test_storage_fallback_warning_reaches_sink() {
        let (lines, subscriber) = capture();

        tracing::subscriber::with_default(subscriber, || {
            let repo = WordRepository::new(MemoryStore::failing());
            assert!(block_on(repo.words()).is_empty());
        });

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::WARN);
        assert!(lines[0].1.contains("storage read failed, using default"));
        assert!(!lines[0].1.ends_with('\n'));
    }

    #[test]
    fn test_levels_below_threshold_dropped() {
        let (lines, subscriber) = capture();

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("not shown");
            tracing::error!("shown");
        });

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::ERROR);
        assert!(lines[0].1.contains("shown"));
    }
}
