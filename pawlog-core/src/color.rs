use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

/// Resets every active SGR attribute.
pub const RESET: &str = "\x1b[0m";

static SGR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

macro_rules! palette {
    ($(#[$meta:meta])* $name:ident, $sgr:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            Black,
            White,
            Red,
            Green,
            Yellow,
            Orange,
            Pink,
            LightPink,
            Blue,
            Cyan,
            Grey,
        }

        impl $name {
            pub const ALL: [Self; 11] = [
                Self::Black,
                Self::White,
                Self::Red,
                Self::Green,
                Self::Yellow,
                Self::Orange,
                Self::Pink,
                Self::LightPink,
                Self::Blue,
                Self::Cyan,
                Self::Grey,
            ];

            /// xterm-256 palette index.
            pub const fn code(self) -> u8 {
                match self {
                    Self::Black => 16,
                    Self::White => 231,
                    Self::Red => 196,
                    Self::Green => 46,
                    Self::Yellow => 226,
                    Self::Orange => 208,
                    Self::Pink => 205,
                    Self::LightPink => 217,
                    Self::Blue => 33,
                    Self::Cyan => 51,
                    Self::Grey => 245,
                }
            }

            pub fn escape(self) -> String {
                format!("\x1b[{};5;{}m", $sgr, self.code())
            }
        }
    };
}

palette!(
    /// Text colors.
    Foreground,
    38
);
palette!(
    /// Cell background colors.
    Background,
    48
);

/// Wraps `text` with the escape sequences of the given colors, terminated by [`RESET`].
/// Without any color the text is returned as is.
pub fn paint(text: &str, fg: Option<Foreground>, bg: Option<Background>) -> String {
    if fg.is_none() && bg.is_none() {
        return text.to_string();
    }
    let fg = fg.map(Foreground::escape).unwrap_or_default();
    let bg = bg.map(Background::escape).unwrap_or_default();
    format!("{fg}{bg}{text}{RESET}")
}

pub fn fg(text: &str, color: Foreground) -> String {
    paint(text, Some(color), None)
}

/// Removes SGR escape sequences, leaving the payload text.
pub fn strip(text: &str) -> Cow<'_, str> {
    SGR.replace_all(text, "")
}

#[test]
fn test_paint_round_trip() {
    for fg in Foreground::ALL {
        for bg in Background::ALL {
            let painted = paint("hello paw", Some(fg), Some(bg));
            assert!(painted.starts_with(&fg.escape()));
            assert!(painted.ends_with(RESET));
            assert_eq!(strip(&painted), "hello paw");
        }
        assert_eq!(strip(&fg.escape()), "");
    }
}

#[test]
fn test_paint_escapes() {
    assert_eq!(
        paint("INFO", Some(Foreground::Black), Some(Background::Yellow)),
        "\x1b[38;5;16m\x1b[48;5;226mINFO\x1b[0m"
    );
    assert_eq!(fg("x", Foreground::Orange), "\x1b[38;5;208mx\x1b[0m");
    assert_eq!(paint("plain", None, None), "plain");
}

#[test]
fn test_strip_leaves_plain_text() {
    assert!(matches!(strip("no escapes here"), Cow::Borrowed(_)));
    assert_eq!(strip("a\x1b[1mb\x1b[0m"), "ab");
}
