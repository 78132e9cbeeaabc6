//! JSON control messages.
//!
//! A control message is a JSON object carrying any subset of the voice's
//! block-rate settings:
//!
//! ```json
//! {
//!   "type": "setup",
//!   "osc1Type": "saw",
//!   "osc2Type": "square",
//!   "osc1Semi": -12,
//!   "osc2Semi": 7,
//!   "sync12": true,
//!   "ring": false
//! }
//! ```
//!
//! Each field also has a descriptive alias:
//!
//! | Field | Alias | Accepted values |
//! |-------|-------|-----------------|
//! | `osc1Type` | `osc1Kind` | `"saw"`, `"square"`, `"triangle"` (any case) |
//! | `osc2Type` | `osc2Kind` | same |
//! | `osc1Semi` | `osc1SemitoneOffset` | number, truncated toward zero |
//! | `osc2Semi` | `osc2SemitoneOffset` | same |
//! | `sync12` | `syncEnabled` | boolean |
//! | `ring` | `ringModEnabled` | boolean |
//!
//! Validation is per field. A field with the wrong type or value is left
//! out of the resulting [`ControlUpdate`] and its key is listed in
//! [`ParsedMessage::rejected`]; the other fields still apply. Only a payload
//! that is not an object, or whose `type` is not `"setup"`, is rejected as a
//! whole. A missing `type` counts as `"setup"`.
//!
//! # Example
//!
//! ```rust
//! use pulse2_config::parse_message;
//! use pulse2_synth::Waveform;
//!
//! let parsed = parse_message(r#"{"osc1Kind": 123, "osc2Type": "Triangle"}"#).unwrap();
//! assert_eq!(parsed.update.osc1_kind, None);
//! assert_eq!(parsed.update.osc2_kind, Some(Waveform::Triangle));
//! assert_eq!(parsed.rejected, vec!["osc1Kind".to_string()]);
//! ```

use pulse2_synth::{ControlUpdate, Waveform};
use serde_json::{Map, Value};

use crate::error::MessageError;

/// Value of the `type` tag for configuration messages.
pub const SETUP_TYPE: &str = "setup";

const OSC1_KIND: [&str; 2] = ["osc1Type", "osc1Kind"];
const OSC2_KIND: [&str; 2] = ["osc2Type", "osc2Kind"];
const OSC1_SEMI: [&str; 2] = ["osc1Semi", "osc1SemitoneOffset"];
const OSC2_SEMI: [&str; 2] = ["osc2Semi", "osc2SemitoneOffset"];
const SYNC: [&str; 2] = ["sync12", "syncEnabled"];
const RING: [&str; 2] = ["ring", "ringModEnabled"];

/// A validated control message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    /// The fields that passed validation.
    pub update: ControlUpdate,
    /// Keys that were present but carried an unusable value.
    pub rejected: Vec<String>,
}

/// Parse a control message from JSON text.
pub fn parse_message(json: &str) -> Result<ParsedMessage, MessageError> {
    let value: Value = serde_json::from_str(json)?;
    parse_value(&value)
}

/// Validate an already decoded JSON value as a control message.
pub fn parse_value(value: &Value) -> Result<ParsedMessage, MessageError> {
    let object = value
        .as_object()
        .ok_or_else(|| MessageError::NotAnObject(kind_of(value)))?;

    match object.get("type") {
        None => {}
        Some(Value::String(tag)) if tag == SETUP_TYPE => {}
        Some(Value::String(tag)) => return Err(MessageError::UnsupportedType(tag.clone())),
        Some(other) => return Err(MessageError::UnsupportedType(other.to_string())),
    }

    let mut parsed = ParsedMessage::default();
    parsed.update.osc1_kind = field(object, OSC1_KIND, waveform, &mut parsed.rejected);
    parsed.update.osc2_kind = field(object, OSC2_KIND, waveform, &mut parsed.rejected);
    parsed.update.osc1_semitones = field(object, OSC1_SEMI, semitones, &mut parsed.rejected);
    parsed.update.osc2_semitones = field(object, OSC2_SEMI, semitones, &mut parsed.rejected);
    parsed.update.sync = field(object, SYNC, Value::as_bool, &mut parsed.rejected);
    parsed.update.ring_mod = field(object, RING, Value::as_bool, &mut parsed.rejected);
    Ok(parsed)
}

/// Encode an update as a setup message using the short field names.
///
/// Absent fields are omitted, so `parse_value(&to_value(u))` yields `u`.
pub fn to_value(update: &ControlUpdate) -> Value {
    let mut object = Map::new();
    object.insert("type".into(), SETUP_TYPE.into());
    if let Some(kind) = update.osc1_kind {
        object.insert(OSC1_KIND[0].into(), kind.name().into());
    }
    if let Some(kind) = update.osc2_kind {
        object.insert(OSC2_KIND[0].into(), kind.name().into());
    }
    if let Some(semis) = update.osc1_semitones {
        object.insert(OSC1_SEMI[0].into(), semis.into());
    }
    if let Some(semis) = update.osc2_semitones {
        object.insert(OSC2_SEMI[0].into(), semis.into());
    }
    if let Some(sync) = update.sync {
        object.insert(SYNC[0].into(), sync.into());
    }
    if let Some(ring) = update.ring_mod {
        object.insert(RING[0].into(), ring.into());
    }
    Value::Object(object)
}

/// Resolve one field from any of its names.
///
/// Names are checked in order and a later valid value overrides an earlier
/// one. Every present but invalid name is recorded in `rejected`.
fn field<T>(
    object: &Map<String, Value>,
    names: [&str; 2],
    convert: impl Fn(&Value) -> Option<T>,
    rejected: &mut Vec<String>,
) -> Option<T> {
    let mut result = None;
    for name in names {
        if let Some(raw) = object.get(name) {
            match convert(raw) {
                Some(v) => result = Some(v),
                None => rejected.push(name.to_string()),
            }
        }
    }
    result
}

fn waveform(value: &Value) -> Option<Waveform> {
    value.as_str().and_then(Waveform::from_name)
}

/// Truncate toward zero, saturating at the `i32` range.
fn semitones(value: &Value) -> Option<i32> {
    let n = value.as_f64()?;
    if !n.is_finite() {
        return None;
    }
    // `as` saturates out-of-range floats
    Some(n.trunc() as i32)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
