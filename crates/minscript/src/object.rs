//! Host-facing value type, detached from the arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::value::Value;

/// A runtime value copied out of the arena for the host.
///
/// Unlike [`Value`], a `ScriptObject` owns its string content and stays valid
/// after the run's arena is dropped or reset. `Display` matches the
/// interpreter's own rendering (numbers with two decimal places, `undefined`,
/// `[Function]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptObject {
    Number(f64),
    String(String),
    Function,
    Undefined,
}

impl ScriptObject {
    /// Detaches `value` from `arena`.
    #[must_use]
    pub fn new(value: Value, arena: &Arena) -> Self {
        match value {
            Value::Number(n) => Self::Number(n),
            Value::Str(id) => Self::String(arena.get_str(id).to_owned()),
            Value::Function(_) => Self::Function,
            Value::Undefined => Self::Undefined,
        }
    }
}

impl fmt::Display for ScriptObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n:.2}"),
            Self::String(s) => f.write_str(s),
            Self::Function => f.write_str("[Function]"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}
