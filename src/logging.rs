//! `env_logger` setup. `RUST_LOG` wins over the configured level.

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use env_logger::{Builder, Env, Target};

use crate::config::LoggingConfig;
use crate::error::{AppError, Context, Result};

/// Where log lines go when no log file is configured.
pub enum LogSink {
    Stderr,
    /// Kept in memory so a full-screen UI can show them without corrupting the display.
    Buffer(LogBuffer),
}

pub fn init_logging(config: &LoggingConfig, sink: LogSink) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(config.level.as_str()));
    builder.format_timestamp_secs();

    if let Some(path) = &config.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    } else if let LogSink::Buffer(buffer) = sink {
        builder.target(Target::Pipe(Box::new(buffer.writer())));
    }

    builder
        .try_init()
        .map_err(|err| AppError::message(format!("failed to initialise logging: {err}")))
}

/// Bounded tail of recent log lines.
#[derive(Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    max_lines: usize,
}

impl LogBuffer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::new())),
            max_lines: max_lines.max(1),
        }
    }

    pub fn push_line(&self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            lines.push_back(line);
            while lines.len() > self.max_lines {
                lines.pop_front();
            }
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.lines.lock().ok().and_then(|lines| lines.back().cloned())
    }

    pub fn writer(&self) -> LogWriter {
        LogWriter {
            buffer: self.clone(),
            partial: String::new(),
        }
    }
}

/// Splits written bytes into lines for a `LogBuffer`.
pub struct LogWriter {
    buffer: LogBuffer,
    partial: String,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(idx) = self.partial.find('\n') {
            let line = self.partial[..idx].trim_end_matches('\r').to_string();
            self.partial.drain(..=idx);
            self.buffer.push_line(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_splits_lines_and_keeps_the_tail() {
        let buffer = LogBuffer::new(2);
        let mut writer = buffer.writer();

        write!(writer, "one\ntw").unwrap();
        assert_eq!(buffer.snapshot(), vec!["one".to_string()]);

        write!(writer, "o\r\n\nthree\n").unwrap();
        assert_eq!(buffer.snapshot(), vec!["two".to_string(), "three".to_string()]);
        assert_eq!(buffer.last().as_deref(), Some("three"));
    }
}
