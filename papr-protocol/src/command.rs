//! Command classification and document validation
//!
//! Every line from the host is one of:
//! - `clear`: wipe the panel
//! - a JSON document (starts with `{` or `[`): a scene or a legacy payload
//! - anything else: unknown, ignored
//!
//! Documents are validated in full before anything is drawn: a syntax
//! error or a schema mismatch rejects the whole command.

use serde_json::Value;

use crate::fields::Fields;
use crate::legacy::LegacyPayload;
use crate::scene::Scene;

/// Plain-text command that wipes the panel
pub const CMD_CLEAR: &str = "clear";

/// Key holding the shape list of a scene document
pub const KEY_SHAPES: &str = "Shapes";

/// Keys holding the command list of a legacy document
pub const KEYS_COMMANDS: &[&str] = &["commands", "Commands"];

/// Reasons a document is rejected before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Malformed JSON
    Syntax { line: usize, column: usize },
    /// Root value is not an object
    RootNotObject,
    /// `Shapes` is present but not an array
    MissingShapes,
    /// Neither a scene nor a legacy payload with a `commands` array
    MissingCommands,
}

/// A classified command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Wipe the panel to white
    Clear,
    /// Structured JSON document
    Document(&'a str),
    /// Unrecognized text
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Classify a line; returns `None` for blank input
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if line.starts_with('{') || line.starts_with('[') {
            return Some(Command::Document(line));
        }

        if line == CMD_CLEAR {
            return Some(Command::Clear);
        }

        Some(Command::Unknown(line))
    }
}

/// A validated JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Scene(Scene),
    Legacy(LegacyPayload),
}

impl Document {
    /// Parse and validate a JSON document
    pub fn parse(json: &str) -> Result<Self, ProtocolError> {
        let root: Value = serde_json::from_str(json).map_err(|e| {
            warn!("JSON parse failed at {}:{}", e.line(), e.column());
            ProtocolError::Syntax {
                line: e.line(),
                column: e.column(),
            }
        })?;

        Self::from_value(&root)
    }

    /// Validate an already parsed root value
    pub fn from_value(root: &Value) -> Result<Self, ProtocolError> {
        let Some(fields) = Fields::of(root) else {
            warn!("Document invalid: root must be an object");
            return Err(ProtocolError::RootNotObject);
        };

        if fields.contains(&[KEY_SHAPES]) {
            let Some(shapes) = fields.array(&[KEY_SHAPES]) else {
                warn!("Scene invalid: missing Shapes array");
                return Err(ProtocolError::MissingShapes);
            };
            return Ok(Document::Scene(Scene::from_values(shapes)));
        }

        let Some(commands) = fields.array(KEYS_COMMANDS) else {
            warn!("Document invalid: no Shapes or commands array");
            return Err(ProtocolError::MissingCommands);
        };
        Ok(Document::Legacy(LegacyPayload::from_parts(fields, commands)))
    }
}
