use std::{
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};

/// Destination of decorated output. Each call to `regular` is one emitted unit, possibly spanning
/// several lines; the writer appends the trailing newline.
pub trait LogWriter: Send + Sync {
    fn regular(&self, line: &str);
    fn flush(&self);
}

#[derive(Default, Debug, Clone, Copy)]
pub struct LogStdout;

impl LogWriter for LogStdout {
    fn regular(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}").ok();
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct LogStderr;

impl LogWriter for LogStderr {
    fn regular(&self, line: &str) {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{line}").ok();
    }

    fn flush(&self) {
        std::io::stderr().flush().ok();
    }
}

/// Keeps emitted units in memory. Clones share the same buffer.
#[derive(Default, Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every unit written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogWriter for LogBuffer {
    fn regular(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }

    fn flush(&self) {}
}

impl<W: LogWriter + ?Sized> LogWriter for Arc<W> {
    fn regular(&self, line: &str) {
        (**self).regular(line)
    }

    fn flush(&self) {
        (**self).flush()
    }
}

#[test]
fn test_log_buffer() {
    let buffer = LogBuffer::new();
    let writer = buffer.clone();
    writer.regular("Hello, world!");
    writer.regular("first\nsecond");
    writer.flush();
    assert_eq!(buffer.lines(), vec!["Hello, world!", "first\nsecond"]);
    buffer.clear();
    assert!(writer.lines().is_empty());
}

#[test]
fn test_log_stdout() {
    let writer = LogStdout;
    writer.regular("Hello, world!");
    writer.regular("rust is awesome !");
    writer.flush();
    LogStderr.regular("to stderr");
    LogStderr.flush();
}
