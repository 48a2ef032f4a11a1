use std::{
    error::Error,
    fmt::{self, Debug, Write},
};

use crate::stack::StackTrace;

pub const NO_ERROR: &str = "<no error>";
pub const NO_STACK_TRACE: &str = "<no stack trace>";
pub const TRUNCATED: &str = "… (truncated)";

const FRAME_CONNECTOR: &str = "├─";
const LAST_FRAME_CONNECTOR: &str = "└─";
const INDENT: &str = "  ";

/// Output budget for [`pretty_object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectLimits {
    pub max_lines: usize,
    pub max_bytes: usize,
}

impl Default for ObjectLimits {
    fn default() -> Self {
        Self {
            max_lines: 200,
            max_bytes: 4096,
        }
    }
}

/// Accepts writes until the budget is spent, then fails every write.
/// A failed write makes `Debug` implementations bail out instead of recursing further.
struct BoundedWriter {
    buf: String,
    limits: ObjectLimits,
    lines: usize,
    truncated: bool,
}

impl Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Err(fmt::Error);
        }
        for c in s.chars() {
            if c == '\n' {
                self.lines += 1;
            }
            if self.lines >= self.limits.max_lines
                || self.buf.len() + c.len_utf8() > self.limits.max_bytes
            {
                self.truncated = true;
                return Err(fmt::Error);
            }
            self.buf.push(c);
        }
        Ok(())
    }
}

/// Indented multi-line rendering of `value`, cut once `limits` is reached.
pub fn pretty_object(value: &dyn Debug, limits: ObjectLimits) -> String {
    let mut writer = BoundedWriter {
        buf: String::new(),
        limits,
        lines: 0,
        truncated: false,
    };
    let _ = write!(writer, "{value:#?}");
    let mut out = indent(&writer.buf);
    if writer.truncated {
        out.push('\n');
        out.push_str(INDENT);
        out.push_str(TRUNCATED);
    }
    out
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The error's message followed by its chain of sources.
pub fn pretty_error(err: Option<&(dyn Error + 'static)>) -> String {
    let Some(err) = err else {
        return NO_ERROR.to_string();
    };
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(&format!("\n{INDENT}caused by: {cause}"));
        source = cause.source();
    }
    out
}

/// The first `max_lines` frames of `trace`, innermost first, one per line.
pub fn pretty_stack_trace(trace: Option<&StackTrace>, max_lines: usize) -> String {
    let Some(trace) = trace else {
        return NO_STACK_TRACE.to_string();
    };
    let shown = trace.len().min(max_lines);
    trace
        .frames()
        .iter()
        .take(shown)
        .enumerate()
        .map(|(i, frame)| {
            let connector = if i + 1 == shown {
                LAST_FRAME_CONNECTOR
            } else {
                FRAME_CONNECTOR
            };
            format!("{connector} {frame}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
fn frame_lines(rendered: &str) -> usize {
    rendered
        .lines()
        .filter(|l| l.starts_with(FRAME_CONNECTOR) || l.starts_with(LAST_FRAME_CONNECTOR))
        .count()
}

#[test]
fn test_pretty_object_nested() {
    use std::collections::BTreeMap;
    let mut map = BTreeMap::new();
    map.insert("ports", vec![80, 443]);
    map.insert("empty", vec![]);
    let rendered = pretty_object(&map, ObjectLimits::default());
    assert!(rendered.lines().count() > 3);
    assert!(rendered.lines().all(|l| l.starts_with(INDENT)));
    assert!(rendered.contains("\"ports\""));
    assert!(rendered.contains("443"));
    assert!(!rendered.contains(TRUNCATED));
    assert_eq!(pretty_object(&42, ObjectLimits::default()), "  42");
}

#[test]
fn test_pretty_object_cycle_terminates() {
    use std::{cell::RefCell, rc::Rc};

    #[derive(Debug)]
    #[allow(dead_code)]
    struct Node {
        name: &'static str,
        next: RefCell<Option<Rc<Node>>>,
    }

    let node = Rc::new(Node {
        name: "self",
        next: RefCell::new(None),
    });
    *node.next.borrow_mut() = Some(Rc::clone(&node));
    let limits = ObjectLimits::default();
    let rendered = pretty_object(&node, limits);
    assert!(rendered.ends_with(TRUNCATED));
    // Indentation adds at most INDENT per line on top of the budget.
    assert!(rendered.len() <= limits.max_bytes + limits.max_lines * INDENT.len() + 32);
    // break the cycle so the test does not leak
    node.next.borrow_mut().take();
}

#[test]
fn test_pretty_object_line_budget() {
    let values: Vec<u32> = (0..1000).collect();
    let rendered = pretty_object(
        &values,
        ObjectLimits {
            max_lines: 10,
            max_bytes: usize::MAX,
        },
    );
    assert_eq!(rendered.lines().count(), 11);
    assert!(rendered.ends_with(TRUNCATED));
}

#[test]
fn test_pretty_error() {
    #[derive(Debug)]
    struct Outer(std::io::Error);
    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("could not load settings")
        }
    }
    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    assert_eq!(pretty_error(None), NO_ERROR);
    let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "settings.toml"));
    assert_eq!(
        pretty_error(Some(&err)),
        "could not load settings\n  caused by: settings.toml"
    );
}

#[test]
fn test_pretty_stack_trace_bounds() {
    assert_eq!(pretty_stack_trace(None, 3), NO_STACK_TRACE);
    for len in 0..6 {
        let trace = StackTrace::from_frames((0..len).map(|i| format!("frame_{i} (src/f.rs:{i})")));
        for max in 0..8 {
            let rendered = pretty_stack_trace(Some(&trace), max);
            assert_eq!(frame_lines(&rendered), len.min(max));
        }
    }
}

#[test]
fn test_pretty_stack_trace_order() {
    let trace = StackTrace::from_frames(["inner", "middle", "outer"]);
    assert_eq!(
        pretty_stack_trace(Some(&trace), 2),
        "├─ inner\n└─ middle"
    );
}
