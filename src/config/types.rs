//! Configuration type definitions
//!
//! Value objects describing a keypad device: HID key actions, matrix keypad
//! configuration, standalone button mappings, and device-wide settings.
//! All of these are created and replaced wholesale; the editor never mutates
//! them in place.

use crate::profile::BoardProfile;
use serde::{Deserialize, Serialize};

/// Number of rows/columns in the keypad matrix
pub const MATRIX_SIZE: usize = 4;

/// A HID keycode selected from the key catalog
///
/// Immutable reference value; the editor only copies entries out of the
/// catalog, it never constructs one ad hoc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidKey {
    /// Catalog identifier (e.g. "KEY_ENTER")
    pub name: String,
    /// Usage code as a hex string (e.g. "0x28")
    pub code: String,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Modifier keys combined with a HID key to form a chorded keystroke
///
/// The four toggles are independent; there is no invariant between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub gui: bool,
}

impl KeyModifiers {
    /// Whether any modifier is active
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt || self.gui
    }
}

/// What an action emits when triggered: a single chorded key, or literal text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionMode {
    Key,
    Text,
}

impl ActionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionMode::Key => "key",
            ActionMode::Text => "text",
        }
    }
}

impl std::fmt::Display for ActionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One behavior triggered on a press event
///
/// When `mode` is [`ActionMode::Key`], `key`/`modifiers` are authoritative
/// and `text` is ignored; when `mode` is [`ActionMode::Text`] it is the
/// other way around. Both sides persist across mode switches, so toggling
/// back and forth loses nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConfig {
    pub mode: ActionMode,
    pub key: HidKey,
    pub modifiers: KeyModifiers,
    pub text: String,
}

impl ActionConfig {
    /// Default action: emit `key` with no modifiers
    pub fn with_key(key: &HidKey) -> Self {
        Self {
            mode: ActionMode::Key,
            key: key.clone(),
            modifiers: KeyModifiers::default(),
            text: String::new(),
        }
    }
}

/// Coordinate of a key in the 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}

impl std::fmt::Display for KeyPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}C{}", self.row, self.col)
    }
}

/// Configuration of one physical key in the matrix
///
/// Identity is `(row, col)`; at most one entry per coordinate is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadKey {
    /// Matrix row, 0-3
    pub row: u8,
    /// Matrix column, 0-3
    pub col: u8,
    /// Display label ("1", "A", "#", ...)
    pub label: String,
    /// Whether the long-press slot is active for this key
    pub long_press_enabled: bool,
    pub short_press: ActionConfig,
    pub long_press: ActionConfig,
}

impl KeypadKey {
    /// Position of this key in the matrix
    pub fn pos(&self) -> KeyPos {
        KeyPos {
            row: self.row,
            col: self.col,
        }
    }
}

/// Configuration of one 4x4 matrix keypad
///
/// `row_pins`/`col_pins` always hold exactly four entries; index i is the
/// GPIO line for physical row/column i. `keys` is sparse: a coordinate with
/// no entry means "no custom action configured", and edits addressed at it
/// are dropped rather than creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadConfig {
    pub id: String,
    pub enabled: bool,
    pub name: String,
    pub row_pins: [u8; MATRIX_SIZE],
    pub col_pins: [u8; MATRIX_SIZE],
    pub keys: Vec<KeypadKey>,
}

impl KeypadConfig {
    /// Build a keypad with all 16 coordinates seeded with default actions
    ///
    /// Pins, labels come from the board profile; the default action emits
    /// `default_key` with no modifiers. Seeding happens here, at creation
    /// time, so every grid cell is editable even though the editor itself
    /// never creates entries.
    pub fn with_default_keys(
        id: impl Into<String>,
        name: impl Into<String>,
        profile: &BoardProfile,
        default_key: &HidKey,
    ) -> Self {
        let mut keys = Vec::with_capacity(MATRIX_SIZE * MATRIX_SIZE);
        for row in 0..MATRIX_SIZE {
            for col in 0..MATRIX_SIZE {
                keys.push(KeypadKey {
                    row: row as u8,
                    col: col as u8,
                    label: profile.key_labels[row][col].clone(),
                    long_press_enabled: false,
                    short_press: ActionConfig::with_key(default_key),
                    long_press: ActionConfig::with_key(default_key),
                });
            }
        }
        Self {
            id: id.into(),
            enabled: true,
            name: name.into(),
            row_pins: profile.default_row_pins,
            col_pins: profile.default_col_pins,
            keys,
        }
    }
}

/// A standalone (non-matrix) button wired to a single GPIO
///
/// Shares the action shapes with keypad keys. Not edited by the keypad
/// editor, but its pin counts toward the globally used set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMapping {
    pub id: String,
    pub pin: u8,
    pub long_press_enabled: bool,
    pub short_press: ActionConfig,
    pub long_press: ActionConfig,
}

/// Device-wide firmware settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    pub manufacturer: String,
    /// Matrix scan debounce, milliseconds
    pub debounce_ms: u16,
    pub deep_sleep_enabled: bool,
    /// Idle time before deep sleep, microseconds
    pub sleep_timeout_us: u64,
    /// Hold time that turns a press into a long press, milliseconds
    pub long_press_ms: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "Keypad Studio".to_string(),
            manufacturer: "DIY".to_string(),
            debounce_ms: 20,
            deep_sleep_enabled: false,
            sleep_timeout_us: 60_000_000,
            long_press_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::profile;

    #[test]
    fn test_seeded_keypad_covers_all_coordinates() {
        let profile = profile::load_default().unwrap();
        let catalog = catalog::load_default().unwrap();
        let keypad =
            KeypadConfig::with_default_keys("kp1", "Keypad 1", &profile, catalog.default_key());

        assert_eq!(keypad.keys.len(), 16);
        for row in 0..4u8 {
            for col in 0..4u8 {
                let key = keypad
                    .keys
                    .iter()
                    .find(|k| k.row == row && k.col == col)
                    .unwrap();
                assert_eq!(key.label, profile.key_labels[row as usize][col as usize]);
                assert_eq!(key.short_press.mode, ActionMode::Key);
                assert!(!key.long_press_enabled);
            }
        }
        assert_eq!(keypad.row_pins, profile.default_row_pins);
        assert_eq!(keypad.col_pins, profile.default_col_pins);
    }

    #[test]
    fn test_modifiers_any() {
        let mut mods = KeyModifiers::default();
        assert!(!mods.any());
        mods.gui = true;
        assert!(mods.any());
    }
}
