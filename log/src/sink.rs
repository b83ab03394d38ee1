//!
//! Output sinks.
//!
//! An unbound logger writes every emitted record to a [`Sink`]. Each
//! record is handed over as one complete string and written in a single
//! operation, so concurrent loggers interleave at record boundaries only.
//!

use crate::console::styled_line;
use crate::levels::{label, Level};
use crate::result::Result;
use downcast::{downcast_sync, AnySync};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A log sink receives every record an unbound logger emits.
/// `message` is the fully formatted text without the level label.
pub trait Sink: AnySync {
    fn write(&self, level: Level, message: &str) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

downcast_sync!(dyn Sink);

/// Plain record text: `[LABEL] message`.
pub fn format_line(level: Level, message: &str) -> String {
    format!("[{}] {message}", label(level))
}

/// Writes records to the process standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&self, level: Level, message: &str) -> Result<()> {
        let line = styled_line(level, message);
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        io::stdout().lock().flush()?;
        Ok(())
    }
}

/// Keeps every record in memory as plain `[LABEL] message` lines.
#[derive(Debug, Default)]
pub struct CaptureSink {
    lines: Mutex<Vec<String>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.recovered().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    pub fn clear(&self) {
        self.recovered().clear();
    }

    // a panic while holding the lock leaves the lines intact
    fn recovered(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for CaptureSink {
    fn write(&self, level: Level, message: &str) -> Result<()> {
        let line = format_line(level, message);
        self.lines.lock()?.push(line);
        Ok(())
    }
}
