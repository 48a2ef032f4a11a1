//! # pawlog
//! Decorated console logger for application development: colored level badges, timestamps,
//! source locations, pretty-printed values, errors and stack traces.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! pawlog = "0.1.0"
//! ```
//!
//! ```rust
//! use pawlog::paw_config;
//!
//! let paw = paw_config()
//!     .with_name("APP")
//!     .with_max_stack_traces(3)
//!     .init_global();
//! paw.info("Hello, world!", None);
//! // the global logger is also reachable from anywhere
//! pawlog::paw().unwrap().warn("Careful", None);
//! // and through the `log` facade
//! log::info!("Hello from log");
//! ```
//!
//! ## Errors and stack traces
//! ```rust
//! use pawlog::{StackTrace, paw_config};
//!
//! let paw = paw_config().build();
//! let err = std::io::Error::other("connection reset");
//! paw.error("request failed", Some(&err), Some(&StackTrace::capture()));
//! ```
//!
//! ## Passing a logger around
//! A logger does not have to be global: `build` returns a value that can be shared by reference
//! or behind an `Arc`.
//!
//! ```rust
//! use pawlog::{LogBuffer, paw_config};
//!
//! let buffer = LogBuffer::new();
//! let paw = paw_config()
//!     .with_name("worker")
//!     .with_colors(false)
//!     .with_enabled(true)
//!     .with_writer(buffer.clone())
//!     .build();
//! paw.debug(&vec![1, 2, 3], None);
//! assert_eq!(buffer.lines().len(), 2);
//! ```

mod error;

use std::{
    error::Error as StdError,
    fmt::{self, Debug, Display},
    panic::Location,
    sync::OnceLock,
};

use colored::Colorize;
use log::{LevelFilter, Log};
use pawlog_core::{
    DEFAULT_NAME, LogLine, PAWLOG_ENV, UNKNOWN_LOCATION, color, pretty_error, pretty_object,
    pretty_stack_trace, source_location,
};

pub use error::Error;
pub use pawlog_core::{
    Frame, Level, LogBuffer, LogStderr, LogStdout, LogWriter, ObjectLimits, StackTrace,
};

/// Settings of a logger. Fixed once the logger is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawConfig {
    /// Name shown in the name badge. Never empty.
    pub name: String,
    /// Maximum number of frames rendered for a stack trace.
    pub max_stack_traces: usize,
    /// Whether lines start with the name badge.
    pub show_name: bool,
    /// Whether anything is written at all.
    pub enabled: bool,
    /// Whether escape sequences are kept in the output.
    pub colors: bool,
    /// Output budget of pretty-printed values.
    pub object_limits: ObjectLimits,
}

static PAW: OnceLock<Paw> = OnceLock::new();

/// Decorating logger.
pub struct Paw {
    config: PawConfig,
    writer: Box<dyn LogWriter>,
}

impl Debug for Paw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paw").field("config", &self.config).finish()
    }
}

impl Paw {
    pub fn new<W: LogWriter + 'static>(config: PawConfig, writer: W) -> Self {
        Self {
            config,
            writer: Box::new(writer),
        }
    }

    pub fn config(&self) -> &PawConfig {
        &self.config
    }

    #[track_caller]
    pub fn info(&self, message: impl Display, trace: Option<&StackTrace>) {
        if self.config.enabled {
            let location = locate(trace, Location::caller());
            self.primary(Level::Info, location, &message.to_string());
        }
    }

    #[track_caller]
    pub fn warn(&self, message: impl Display, trace: Option<&StackTrace>) {
        if self.config.enabled {
            let location = locate(trace, Location::caller());
            self.primary(Level::Warn, location, &message.to_string());
        }
    }

    /// Writes a line naming the type of `object`, then the pretty-printed value.
    #[track_caller]
    pub fn debug<T: Debug + ?Sized>(&self, object: &T, trace: Option<&StackTrace>) {
        if !self.config.enabled {
            return;
        }
        let location = locate(trace, Location::caller());
        self.primary(Level::Debug, location, std::any::type_name::<T>());
        let rendered = pretty_object(&object, self.config.object_limits);
        self.emit(&color::fg(&rendered, Level::Debug.accent()));
    }

    /// Writes the message line, then the error with its sources, then at most
    /// `max_stack_traces` frames of `trace`.
    #[track_caller]
    pub fn error(
        &self,
        message: impl Display,
        error: Option<&(dyn StdError + 'static)>,
        trace: Option<&StackTrace>,
    ) {
        if !self.config.enabled {
            return;
        }
        let location = locate(trace, Location::caller());
        self.primary(Level::Error, location, &message.to_string());
        self.emit(&color::fg(&pretty_error(error), Level::Error.accent()));
        let frames = pretty_stack_trace(trace, self.config.max_stack_traces);
        if !frames.is_empty() {
            self.emit(&frames.dimmed().to_string());
        }
    }

    fn primary(&self, level: Level, location: String, message: &str) {
        let line = LogLine::new(level, location, message);
        self.emit(&line.render(&self.config.name, self.config.show_name));
    }

    fn emit(&self, text: &str) {
        if self.config.colors {
            self.writer.regular(text);
        } else {
            self.writer.regular(&color::strip(text));
        }
    }
}

fn locate(trace: Option<&StackTrace>, caller: &Location<'_>) -> String {
    match trace {
        Some(trace) => source_location(Some(trace)),
        None => format!("{}:{}", caller.file(), caller.line()),
    }
}

impl Log for Paw {
    fn enabled(&self, _: &log::Metadata) -> bool {
        self.config.enabled
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            _ => UNKNOWN_LOCATION.to_string(),
        };
        self.primary(record.level().into(), location, &record.args().to_string());
    }

    fn flush(&self) {
        self.writer.flush();
    }
}

/// Builder for configuring and initializing the logger.
pub struct ConfigBuilder {
    name: Option<String>,
    max_stack_traces: usize,
    show_name: bool,
    enabled: bool,
    colors: bool,
    object_limits: ObjectLimits,
    writer: Option<Box<dyn LogWriter>>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            name: Some(PAWLOG_ENV.NAME.clone()),
            max_stack_traces: PAWLOG_ENV.MAX_STACK_TRACES,
            show_name: PAWLOG_ENV.SHOW_NAME,
            enabled: cfg!(debug_assertions),
            colors: colored::control::SHOULD_COLORIZE.should_colorize(),
            object_limits: ObjectLimits::default(),
            writer: None,
        }
    }
}

impl ConfigBuilder {
    /// Builds a standalone logger without installing it globally.
    pub fn build(self) -> Paw {
        let Self {
            name,
            max_stack_traces,
            show_name,
            enabled,
            colors,
            object_limits,
            writer,
        } = self;
        let name = name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        Paw {
            config: PawConfig {
                name,
                max_stack_traces,
                show_name,
                enabled,
                colors,
                object_limits,
            },
            writer: writer.unwrap_or_else(|| Box::new(LogStdout)),
        }
    }

    /// Sets the logger name. An empty name falls back to `PAW`.
    pub fn with_name(self, name: &str) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }
    /// Maybe sets the logger name
    pub fn maybe_with_name(self, name: Option<&str>) -> Self {
        Self {
            name: name.map(String::from).or(self.name),
            ..self
        }
    }
    /// Sets the number of frames rendered for stack traces.
    pub fn with_max_stack_traces(self, max_stack_traces: usize) -> Self {
        Self {
            max_stack_traces,
            ..self
        }
    }
    /// Maybe sets the number of frames rendered for stack traces.
    pub fn maybe_with_max_stack_traces(self, max_stack_traces: Option<usize>) -> Self {
        Self {
            max_stack_traces: max_stack_traces.unwrap_or(self.max_stack_traces),
            ..self
        }
    }
    /// Shows or hides the name badge.
    pub fn with_show_name(self, show_name: bool) -> Self {
        Self { show_name, ..self }
    }
    /// Maybe shows or hides the name badge.
    pub fn maybe_with_show_name(self, show_name: Option<bool>) -> Self {
        Self {
            show_name: show_name.unwrap_or(self.show_name),
            ..self
        }
    }
    /// Turns all output on or off. Defaults to on in debug builds only.
    pub fn with_enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }
    /// Keeps or strips escape sequences. Defaults to what `colored` detects for the terminal.
    pub fn with_colors(self, colors: bool) -> Self {
        Self { colors, ..self }
    }
    pub fn with_object_limits(self, object_limits: ObjectLimits) -> Self {
        Self {
            object_limits,
            ..self
        }
    }
    /// Sets the destination of the output. Defaults to stdout.
    pub fn with_writer<W: LogWriter + 'static>(self, writer: W) -> Self {
        Self {
            writer: Some(Box::new(writer)),
            ..self
        }
    }
    /// Installs the logger for the whole process and registers it with the `log` facade.
    /// Only the first call has an effect; later calls return the logger already installed.
    #[track_caller]
    pub fn init_global(self) -> &'static Paw {
        let caller = Location::caller();
        let mut installed = false;
        let paw = PAW.get_or_init(|| {
            installed = true;
            self.build()
        });
        if installed {
            if log::set_logger(paw).is_ok() {
                log::set_max_level(LevelFilter::Trace);
            }
            if paw.config.enabled {
                paw.primary(Level::Info, locate(None, caller), "Paw initialized");
            }
        }
        paw
    }
}

/// Returns a default ConfigBuilder for configuring the logger.
pub fn paw_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

/// Installs the global logger, see [`ConfigBuilder::init_global`]. Missing arguments take the
/// `PAWLOG_*` environment defaults.
#[track_caller]
pub fn init(
    name: Option<&str>,
    max_stack_traces: Option<usize>,
    show_name: Option<bool>,
) -> &'static Paw {
    paw_config()
        .maybe_with_name(name)
        .maybe_with_max_stack_traces(max_stack_traces)
        .maybe_with_show_name(show_name)
        .init_global()
}

/// The global logger.
pub fn paw() -> Result<&'static Paw, Error> {
    PAW.get().ok_or_else(|| {
        let err = Error::NotInitialized;
        if cfg!(debug_assertions) {
            eprintln!("{}", err.to_string().red());
        }
        err
    })
}

#[cfg(test)]
fn buffered() -> (ConfigBuilder, LogBuffer) {
    let buffer = LogBuffer::new();
    let builder = paw_config()
        .with_name("APP")
        .with_max_stack_traces(2)
        .with_show_name(true)
        .with_enabled(true)
        .with_colors(false)
        .with_writer(buffer.clone());
    (builder, buffer)
}

#[cfg(test)]
#[derive(Debug)]
struct Boom;

#[cfg(test)]
impl Display for Boom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("boom went the engine")
    }
}

#[cfg(test)]
impl StdError for Boom {}

#[test]
fn test_info_line() {
    let (builder, buffer) = buffered();
    let paw = builder.build();
    paw.info("ready", None);
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(line.starts_with("[APP] [ INFO  ] "));
    assert!(line.ends_with(" | ready"));
    assert!(line.contains("src/lib.rs:"));
    assert_eq!(line.matches(" | ").count(), 2);
}

#[test]
fn test_error_lines() {
    let (builder, buffer) = buffered();
    let paw = builder.build();
    let trace = StackTrace::from_frames((0..5).map(|i| format!("frame_{i} (src/app.rs:{i}0)")));
    paw.error("boom", Some(&Boom), Some(&trace));
    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("[ ERROR ]"));
    assert!(lines[0].contains("src/app.rs:10 | "));
    assert!(lines[0].ends_with(" | boom"));
    assert_eq!(lines[1], "boom went the engine");
    assert_eq!(lines[2].lines().count(), 2);
    assert!(lines[2].contains("frame_0"));
    assert!(lines[2].contains("frame_1"));
    assert!(!lines[2].contains("frame_2"));
}

#[test]
fn test_error_without_details() {
    let (builder, buffer) = buffered();
    let paw = builder.build();
    paw.error("lost", None, None);
    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], pawlog_core::NO_ERROR);
    assert_eq!(lines[2], pawlog_core::NO_STACK_TRACE);

    let (builder, buffer) = buffered();
    let paw = builder.with_max_stack_traces(0).build();
    paw.error("lost", Some(&Boom), Some(&StackTrace::from_frames(["a", "b"])));
    assert_eq!(buffer.lines().len(), 2);
}

#[test]
fn test_debug_object() {
    let (builder, buffer) = buffered();
    let paw = builder.build();
    paw.debug(&vec![("a", 1), ("b", 2)], None);
    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[ DEBUG ]"));
    assert!(lines[0].contains("Vec<(&str, i32)>"));
    assert!(lines[1].contains("\"b\""));
    assert!(lines[1].lines().count() > 2);
}

#[test]
fn test_warn_with_trace() {
    let (builder, buffer) = buffered();
    let paw = builder.with_show_name(false).build();
    let trace = StackTrace::parse(
        "   0: app::log\n             at ./src/log.rs:1:1\n   1: app::main\n             at ./src/main.rs:9:5\n",
    );
    paw.warn("low memory", Some(&trace));
    paw.warn("unparsed", Some(&StackTrace::default()));
    let lines = buffer.lines();
    assert!(lines[0].starts_with("[ WARN  ] src/main.rs:9 | "));
    assert!(lines[1].starts_with("[ WARN  ] unknown | "));
}

#[test]
fn test_name_fallback() {
    let (builder, buffer) = buffered();
    let paw = builder.with_name("   ").build();
    assert_eq!(paw.config().name, "PAW");
    paw.info("hi", None);
    assert!(buffer.lines()[0].starts_with("[PAW] "));
    let paw = paw_config().with_name("").build();
    assert_eq!(paw.config().name, DEFAULT_NAME);
    let paw = paw_config().maybe_with_name(None).build();
    assert!(!paw.config().name.is_empty());
}

#[test]
fn test_disabled_writes_nothing() {
    let (builder, buffer) = buffered();
    let paw = builder.with_enabled(false).build();
    paw.info("a", None);
    paw.warn("b", None);
    paw.debug(&1, None);
    paw.error("c", Some(&Boom), None);
    log::Log::log(
        &paw,
        &log::Record::builder()
            .args(format_args!("d"))
            .level(log::Level::Info)
            .build(),
    );
    assert!(buffer.lines().is_empty());
}

#[test]
fn test_colors_kept() {
    let (builder, buffer) = buffered();
    let paw = builder.with_colors(true).build();
    paw.info("ready", None);
    let line = &buffer.lines()[0];
    assert!(line.contains(&pawlog_core::Foreground::Yellow.escape()));
    assert!(color::strip(line).ends_with(" | ready"));
}

#[test]
fn test_log_record() {
    let (builder, buffer) = buffered();
    let paw = builder.build();
    log::Log::log(
        &paw,
        &log::Record::builder()
            .args(format_args!("from facade"))
            .level(log::Level::Trace)
            .file(Some("src/net.rs"))
            .line(Some(77))
            .build(),
    );
    log::Log::log(
        &paw,
        &log::Record::builder()
            .args(format_args!("no location"))
            .level(log::Level::Warn)
            .build(),
    );
    let lines = buffer.lines();
    assert!(lines[0].contains("[ DEBUG ] src/net.rs:77 | "));
    assert!(lines[0].ends_with(" | from facade"));
    assert!(lines[1].contains("[ WARN  ] unknown | "));
}

#[test]
fn test_explicit_config() {
    let buffer = LogBuffer::new();
    let config = PawConfig {
        name: "svc".into(),
        max_stack_traces: 1,
        show_name: true,
        enabled: true,
        colors: false,
        object_limits: ObjectLimits {
            max_lines: 3,
            max_bytes: 1024,
        },
    };
    let paw = Paw::new(config.clone(), buffer.clone());
    assert_eq!(paw.config(), &config);
    paw.debug(&(0..50).collect::<Vec<u8>>(), None);
    let lines = buffer.lines();
    assert!(lines[0].starts_with("[svc] [ DEBUG ] "));
    assert_eq!(lines[1].lines().count(), 4);
    assert!(lines[1].ends_with(pawlog_core::TRUNCATED));
}
