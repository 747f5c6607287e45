//! Legacy flat command payloads
//!
//! Older producers send primitive draw operations in pixel coordinates:
//! ```text
//! { "clear": true, "commands": [ { "type": "rect", "x": 10, "y": 10,
//!                                  "w": 5, "h": 5, "fill": true } ] }
//! ```
//! The very first producer capitalized every key (`"X"`, `"Fill"`), so each
//! field is looked up lowercase first with the capitalized spelling as
//! fallback.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::Value;

use crate::fields::Fields;

/// A single primitive draw operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyCommand {
    /// Text with its top-left corner at (x, y); `size` is a text scale step
    Text {
        x: i32,
        y: i32,
        size: i32,
        content: String,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        fill: bool,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
    Circle {
        x: i32,
        y: i32,
        r: i32,
        fill: bool,
    },
    /// A `type` the renderer does not know
    Unknown { type_name: String },
    /// An element without a `type` field
    Untyped,
}

impl LegacyCommand {
    /// Decode one element of a `commands` array
    pub fn from_value(value: &Value) -> Self {
        let Some(cmd) = Fields::of(value) else {
            return LegacyCommand::Untyped;
        };
        let Some(type_name) = cmd.text(&["type", "Type"]) else {
            return LegacyCommand::Untyped;
        };

        let int = |lower: &str, upper: &str| cmd.int_or(&[lower, upper], 0);
        let fill = || cmd.flag_or(&["fill", "Fill"], true);

        match type_name {
            "text" => LegacyCommand::Text {
                x: int("x", "X"),
                y: int("y", "Y"),
                size: cmd.int_or(&["size", "Size"], 1),
                content: cmd.text_or(&["content", "Content"], "").to_string(),
            },
            "rect" => LegacyCommand::Rect {
                x: int("x", "X"),
                y: int("y", "Y"),
                w: int("w", "W"),
                h: int("h", "H"),
                fill: fill(),
            },
            "line" => LegacyCommand::Line {
                x1: int("x1", "X1"),
                y1: int("y1", "Y1"),
                x2: int("x2", "X2"),
                y2: int("y2", "Y2"),
            },
            "circle" => LegacyCommand::Circle {
                x: int("x", "X"),
                y: int("y", "Y"),
                r: int("r", "R"),
                fill: fill(),
            },
            other => LegacyCommand::Unknown {
                type_name: other.to_string(),
            },
        }
    }
}

/// A decoded legacy document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegacyPayload {
    /// Wipe the surface to white before running the commands
    pub clear: bool,
    pub commands: Vec<LegacyCommand>,
}

impl LegacyPayload {
    /// Decode from a root object whose `commands` array was already located
    pub fn from_parts(root: Fields<'_>, commands: &[Value]) -> Self {
        Self {
            clear: root.flag_or(&["clear", "Clear"], false),
            commands: commands.iter().map(LegacyCommand::from_value).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(json: &str) -> LegacyCommand {
        LegacyCommand::from_value(&serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_rect_lowercase() {
        let cmd = command(r#"{"type":"rect","x":10,"y":10,"w":5,"h":5,"fill":true}"#);
        assert_eq!(
            cmd,
            LegacyCommand::Rect {
                x: 10,
                y: 10,
                w: 5,
                h: 5,
                fill: true
            }
        );
    }

    #[test]
    fn test_rect_capitalized_fallback() {
        let cmd = command(r#"{"type":"rect","X":10,"Y":10,"W":5,"H":5,"Fill":false}"#);
        assert_eq!(
            cmd,
            LegacyCommand::Rect {
                x: 10,
                y: 10,
                w: 5,
                h: 5,
                fill: false
            }
        );
    }

    #[test]
    fn test_lowercase_preferred() {
        let cmd = command(r#"{"type":"circle","x":1,"X":2,"r":3}"#);
        assert_eq!(
            cmd,
            LegacyCommand::Circle {
                x: 1,
                y: 0,
                r: 3,
                fill: true
            }
        );
    }

    #[test]
    fn test_text_defaults() {
        let cmd = command(r#"{"type":"text","Content":"hi"}"#);
        assert_eq!(
            cmd,
            LegacyCommand::Text {
                x: 0,
                y: 0,
                size: 1,
                content: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_line() {
        let cmd = command(r#"{"type":"line","x1":1,"Y1":2,"x2":3,"y2":4}"#);
        assert_eq!(
            cmd,
            LegacyCommand::Line {
                x1: 1,
                y1: 2,
                x2: 3,
                y2: 4
            }
        );
    }

    #[test]
    fn test_unknown_and_untyped() {
        assert_eq!(
            command(r#"{"type":"triangle"}"#),
            LegacyCommand::Unknown {
                type_name: "triangle".to_string()
            }
        );
        assert_eq!(command(r#"{"x": 1}"#), LegacyCommand::Untyped);
        assert_eq!(command("42"), LegacyCommand::Untyped);
    }

    #[test]
    fn test_payload_clear_flag() {
        let root: Value = serde_json::from_str(r#"{"Clear": true, "commands": []}"#).unwrap();
        let fields = Fields::of(&root).unwrap();
        let payload = LegacyPayload::from_parts(fields, &[]);
        assert!(payload.clear);
        assert!(payload.commands.is_empty());
    }
}
