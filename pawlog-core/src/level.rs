use std::fmt;

use crate::color::{Background, Foreground};

/// Severity of a decorated line. Only selects the badge and colors, nothing is filtered on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warn,
    Debug,
    Error,
}

impl Level {
    pub const fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Debug => "DEBUG",
            Level::Error => "ERROR",
        }
    }

    /// Text and background colors of the level badge.
    pub const fn badge_colors(self) -> (Foreground, Background) {
        match self {
            Level::Info => (Foreground::Black, Background::Yellow),
            Level::Warn => (Foreground::LightPink, Background::Pink),
            Level::Debug => (Foreground::Black, Background::LightPink),
            Level::Error => (Foreground::White, Background::Orange),
        }
    }

    /// Color of the line body: the badge background used as a text color.
    pub const fn accent(self) -> Foreground {
        match self {
            Level::Info => Foreground::Yellow,
            Level::Warn => Foreground::Pink,
            Level::Debug => Foreground::LightPink,
            Level::Error => Foreground::Orange,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

#[test]
fn test_from_log_level() {
    assert_eq!(Level::from(log::Level::Trace), Level::Debug);
    assert_eq!(Level::from(log::Level::Error), Level::Error);
    assert_eq!(Level::Warn.to_string(), "WARN");
}
