//! Log plumbing. The desktop owns the terminal, so nothing may be written to
//! stdout or stderr while it runs: logs go to a file or nowhere.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

pub struct LogWriter {
    inner: LogInner,
}

enum LogInner {
    File(Arc<File>),
    Discard(io::Sink),
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            LogInner::File(file) => (&**file).write(buf),
            LogInner::Discard(sink) => sink.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            LogInner::File(file) => (&**file).flush(),
            LogInner::Discard(sink) => sink.flush(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LogMakeWriter {
    file: Option<Arc<File>>,
}

impl LogMakeWriter {
    pub fn discard() -> Self {
        Self::default()
    }

    /// Append to `path`, creating it if needed.
    pub fn file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Arc::new(file)),
        })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogMakeWriter {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => LogInner::File(Arc::clone(file)),
            None => LogInner::Discard(io::sink()),
        };
        LogWriter { inner }
    }
}

/// Install the global subscriber. Later calls are no-ops, which keeps tests
/// that initialize logging independent of each other.
pub fn init(level: Level, log_file: Option<&Path>) -> io::Result<()> {
    let writer = match log_file {
        Some(path) => LogMakeWriter::file(path)?,
        None => LogMakeWriter::discard(),
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}
