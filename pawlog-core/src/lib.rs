//! # pawlog-core
//! Core utilities for pawlog - colors, decoration pipeline and console writers.

pub mod color;
mod config;
mod decorate;
mod level;
mod log_writer;
mod pretty;
mod stack;

pub use color::{Background, Foreground};
pub use config::{DEFAULT_NAME, PAWLOG_ENV, PawLogEnv};
pub use decorate::{
    DELIMITER, LogLine, UNKNOWN_LOCATION, badge, level_badge, name_badge, source_location,
    timestamp, timestamp_at,
};
pub use level::Level;
pub use log_writer::{LogBuffer, LogStderr, LogStdout, LogWriter};
pub use pretty::{
    NO_ERROR, NO_STACK_TRACE, ObjectLimits, TRUNCATED, pretty_error, pretty_object,
    pretty_stack_trace,
};
pub use stack::{Frame, StackTrace};
