use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use colored::Colorize;

use crate::{
    color::{self, Background, Foreground},
    level::Level,
    stack::StackTrace,
};

/// Rendered when no `<file>:<line>` can be found.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Separates the location, time and message of a line.
pub const DELIMITER: &str = " | ";

/// Wall clock time of the local system, `HH:MM:SS`.
pub fn timestamp() -> String {
    timestamp_at(&Local::now())
}

pub fn timestamp_at<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%H:%M:%S").to_string()
}

/// `<file>:<line>` of the second frame of `trace`, the frame that called whoever captured it.
pub fn source_location(trace: Option<&StackTrace>) -> String {
    trace
        .and_then(|trace| trace.frames().get(1))
        .and_then(|frame| frame.file_line())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}

pub fn badge(label: &str, fg: Foreground, bg: Background) -> String {
    color::paint(&format!("[ {label:^5} ]"), Some(fg), Some(bg))
}

pub fn level_badge(level: Level) -> String {
    let (fg, bg) = level.badge_colors();
    badge(level.label(), fg, bg)
}

pub fn name_badge(name: &str, show: bool) -> String {
    if !show {
        return String::new();
    }
    format!("[{name}]").bold().to_string()
}

/// A single decorated line, built per call and dropped once written.
#[derive(Debug, Clone)]
pub struct LogLine<'a> {
    pub level: Level,
    pub location: String,
    pub time: String,
    pub message: &'a str,
}

impl<'a> LogLine<'a> {
    /// A line stamped with the current local time.
    pub fn new(level: Level, location: String, message: &'a str) -> Self {
        Self {
            level,
            location,
            time: timestamp(),
            message,
        }
    }

    pub fn render(&self, name: &str, show_name: bool) -> String {
        let body = [self.location.as_str(), self.time.as_str(), self.message].join(DELIMITER);
        let body = color::fg(&body, self.level.accent());
        let name = name_badge(name, show_name);
        let badge = level_badge(self.level);
        if name.is_empty() {
            format!("{badge} {body}")
        } else {
            format!("{name} {badge} {body}")
        }
    }
}

#[test]
fn test_timestamp_format() {
    let time = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
    assert_eq!(timestamp_at(&time), "07:05:03");
    let now = timestamp();
    assert_eq!(now.len(), 8);
    assert_eq!(now.matches(':').count(), 2);
}

#[test]
fn test_source_location() {
    assert_eq!(source_location(None), UNKNOWN_LOCATION);
    assert_eq!(
        source_location(Some(&StackTrace::default())),
        UNKNOWN_LOCATION
    );
    let trace = StackTrace::from_frames(["log (src/log.rs:3:1)", "main (src/main.rs:12:5)"]);
    assert_eq!(source_location(Some(&trace)), "src/main.rs:12");
    let trace = StackTrace::from_frames(["log (src/log.rs:3:1)", "<garbled frame>"]);
    assert_eq!(source_location(Some(&trace)), UNKNOWN_LOCATION);
}

#[test]
fn test_badges() {
    let info = level_badge(Level::Info);
    assert_eq!(color::strip(&info), "[ INFO  ]");
    assert_eq!(color::strip(&level_badge(Level::Error)), "[ ERROR ]");
    assert!(info.starts_with(&Foreground::Black.escape()));
    assert_eq!(name_badge("APP", false), "");
    assert_eq!(color::strip(&name_badge("APP", true)), "[APP]");
}

#[test]
fn test_render_line() {
    let line = LogLine {
        level: Level::Warn,
        location: "src/main.rs:4".into(),
        time: "10:20:30".into(),
        message: "disk almost full",
    };
    let rendered = line.render("APP", true);
    assert_eq!(
        color::strip(&rendered),
        "[APP] [ WARN  ] src/main.rs:4 | 10:20:30 | disk almost full"
    );
    assert!(rendered.contains(&Foreground::Pink.escape()));
    assert_eq!(
        color::strip(&line.render("APP", false)),
        "[ WARN  ] src/main.rs:4 | 10:20:30 | disk almost full"
    );
}
