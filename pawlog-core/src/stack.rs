use std::{backtrace::Backtrace, fmt, sync::LazyLock};

use regex::Regex;

static FRAME_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+):\s+(.+?)\s*$").unwrap());
static FRAME_AT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*at\s+(.+?)\s*$").unwrap());
static FILE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<file>[^\s()]+?):(?P<line>\d+)(?::\d+)?\)?\s*$").unwrap()
});

/// One entry of a call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    descriptor: String,
    location: Option<String>,
}

impl Frame {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
            location: None,
        }
    }

    pub fn with_location(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// `<file>:<line>` of the frame, looked up in the location first, then in the descriptor.
    pub fn file_line(&self) -> Option<String> {
        self.location
            .as_deref()
            .and_then(file_line)
            .or_else(|| file_line(&self.descriptor))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} ({location})", self.descriptor),
            None => f.write_str(&self.descriptor),
        }
    }
}

fn file_line(text: &str) -> Option<String> {
    let caps = FILE_LINE.captures(text)?;
    let file = caps.name("file")?.as_str();
    let file = file.strip_prefix("file://").unwrap_or(file);
    let file = file.strip_prefix("./").unwrap_or(file);
    Some(format!("{file}:{}", &caps["line"]))
}

/// Frames of a call stack, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    frames: Vec<Frame>,
}

impl StackTrace {
    /// Builds a trace out of already formatted frame descriptors.
    pub fn from_frames<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        frames.into_iter().map(Frame::new).collect()
    }

    /// Reads a textual trace. Understands the std backtrace layout (`N: symbol` followed by
    /// `at file:line:col`); any other non-empty line is taken as a frame of its own.
    pub fn parse(text: &str) -> Self {
        let mut frames: Vec<Frame> = Vec::new();
        let mut awaiting_location = false;
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("note:") {
                continue;
            }
            if let Some(caps) = FRAME_HEADER.captures(line) {
                frames.push(Frame::new(&caps[2]));
                awaiting_location = true;
                continue;
            }
            if awaiting_location
                && let Some(caps) = FRAME_AT.captures(line)
                && let Some(last) = frames.last_mut()
            {
                last.location = Some(caps[1].to_string());
            } else {
                frames.push(Frame::new(trimmed));
            }
            awaiting_location = false;
        }
        Self { frames }
    }

    /// Captures the stack of the calling thread. The first frame is the caller of `capture`.
    #[inline(never)]
    pub fn capture() -> Self {
        let mut trace = Self::from(&Backtrace::force_capture());
        let skip = trace
            .frames
            .iter()
            .position(|frame| frame.descriptor.contains("StackTrace::capture"))
            .map_or(0, |i| i + 1);
        trace.frames.drain(..skip);
        trace
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl From<&Backtrace> for StackTrace {
    fn from(backtrace: &Backtrace) -> Self {
        Self::parse(&backtrace.to_string())
    }
}

impl FromIterator<Frame> for StackTrace {
    fn from_iter<T: IntoIterator<Item = Frame>>(iter: T) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "#{i} {frame}")?;
        }
        Ok(())
    }
}

#[test]
fn test_parse_std_backtrace() {
    let text = "   0: app::worker::run
             at ./src/worker.rs:42:9
   1: app::main
             at ./src/main.rs:7:5
   2: core::ops::function::FnOnce::call_once
";
    let trace = StackTrace::parse(text);
    assert_eq!(trace.len(), 3);
    assert_eq!(trace.frames()[0].descriptor(), "app::worker::run");
    assert_eq!(trace.frames()[0].location(), Some("./src/worker.rs:42:9"));
    assert_eq!(trace.frames()[1].file_line().as_deref(), Some("src/main.rs:7"));
    assert_eq!(trace.frames()[2].file_line(), None);
}

#[test]
fn test_parse_line_per_frame() {
    let text = "#0      main (file:///home/me/app/bin/main.dart:3:5)
#1      _startIsolate (dart:isolate-patch/isolate_patch.dart:301:19)";
    let trace = StackTrace::parse(text);
    assert_eq!(trace.len(), 2);
    assert_eq!(
        trace.frames()[0].file_line().as_deref(),
        Some("/home/me/app/bin/main.dart:3")
    );
    assert_eq!(
        trace.frames()[1].file_line().as_deref(),
        Some("dart:isolate-patch/isolate_patch.dart:301")
    );
}

#[test]
fn test_file_line_tolerates_garbage() {
    assert_eq!(Frame::new("").file_line(), None);
    assert_eq!(Frame::new("pawlog::decorate::render").file_line(), None);
    assert_eq!(Frame::new("<unknown>").file_line(), None);
    let frame = Frame::new("app::main").with_location("./src/main.rs:3:1");
    assert_eq!(frame.file_line().as_deref(), Some("src/main.rs:3"));
    assert_eq!(frame.to_string(), "app::main (./src/main.rs:3:1)");
    assert_eq!(
        Frame::new("at handler (C:\\srv\\app.js:10:2)").file_line().as_deref(),
        Some("C:\\srv\\app.js:10")
    );
}

#[test]
fn test_capture_starts_at_caller() {
    let trace = StackTrace::capture();
    assert!(
        trace
            .frames()
            .iter()
            .all(|frame| !frame.descriptor().contains("StackTrace::capture"))
    );
}
