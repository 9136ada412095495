//! Partial updates emitted by the keypad editor
//!
//! Every edit gesture produces exactly one patch touching exactly one
//! top-level field of a [`KeypadConfig`](super::types::KeypadConfig). The
//! owning store merges the patch; the editor never writes through.

use super::types::{KeypadKey, MATRIX_SIZE};
use serde::{Deserialize, Serialize};

/// Single-field update to a keypad configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeypadPatch {
    /// Replace the `enabled` flag
    Enabled(bool),
    /// Replace the whole key list (copy-on-write result of a key edit)
    Keys(Vec<KeypadKey>),
    /// Replace the row pin assignment
    RowPins([u8; MATRIX_SIZE]),
    /// Replace the column pin assignment
    ColPins([u8; MATRIX_SIZE]),
}

impl KeypadPatch {
    /// Name of the field this patch replaces, for logging
    pub fn field_name(&self) -> &'static str {
        match self {
            KeypadPatch::Enabled(_) => "enabled",
            KeypadPatch::Keys(_) => "keys",
            KeypadPatch::RowPins(_) => "row_pins",
            KeypadPatch::ColPins(_) => "col_pins",
        }
    }
}

impl std::fmt::Display for KeypadPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}
