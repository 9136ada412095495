//! Keypad editor core
//!
//! Pure operations that translate edit gestures into [`KeypadPatch`] values
//! over a read-only [`KeypadConfig`] snapshot, plus the editor's transient
//! UI state (selected cell, pin panel visibility).
//!
//! Every mutation entry point shares one contract: addressing a coordinate
//! with no backing [`KeypadKey`] returns `None` instead of a patch. Nothing
//! is created, nothing errors. The contract lives in [`map_key_at`] so call
//! sites cannot drift.

pub mod panel;

use crate::catalog::DEFAULT_KEY_NAME;
use crate::config::{
    ActionMode, HidKey, KeyPos, KeypadConfig, KeypadKey, KeypadPatch, MATRIX_SIZE,
};

/// Which press slot of a key an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Long,
}

impl PressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressKind::Short => "short press",
            PressKind::Long => "long press",
        }
    }
}

/// Which pin sequence of a keypad an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinAxis {
    Row,
    Col,
}

/// One of the four chord modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKey {
    Ctrl,
    Shift,
    Alt,
    Gui,
}

impl ModifierKey {
    /// All modifiers, in display order
    pub fn all() -> &'static [ModifierKey] {
        &[
            ModifierKey::Ctrl,
            ModifierKey::Shift,
            ModifierKey::Alt,
            ModifierKey::Gui,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierKey::Ctrl => "ctrl",
            ModifierKey::Shift => "shift",
            ModifierKey::Alt => "alt",
            ModifierKey::Gui => "gui",
        }
    }
}

/// A single-field edit to one action of one key
#[derive(Debug, Clone, PartialEq)]
pub enum ActionField {
    Mode(ActionMode),
    Key(HidKey),
    Text(String),
}

/// Find the key configured at `(row, col)`, if any
///
/// Linear scan; the collection holds at most 16 entries.
pub fn key_at(keypad: &KeypadConfig, row: u8, col: u8) -> Option<&KeypadKey> {
    keypad.keys.iter().find(|k| k.row == row && k.col == col)
}

/// Copy-on-write update of the key at `(row, col)`
///
/// Returns a `Keys` patch where the matching entry is replaced by
/// `transform(entry)` and every other entry is cloned unchanged. Returns
/// `None` when no entry matches; this is the single place implementing the
/// absent-coordinate no-op.
fn map_key_at(
    keypad: &KeypadConfig,
    row: u8,
    col: u8,
    transform: impl Fn(&KeypadKey) -> KeypadKey,
) -> Option<KeypadPatch> {
    key_at(keypad, row, col)?;
    let keys = keypad
        .keys
        .iter()
        .map(|k| {
            if k.row == row && k.col == col {
                transform(k)
            } else {
                k.clone()
            }
        })
        .collect();
    Some(KeypadPatch::Keys(keys))
}

/// Replace one field of one press slot of the key at `(row, col)`
pub fn update_key_action(
    keypad: &KeypadConfig,
    row: u8,
    col: u8,
    kind: PressKind,
    field: ActionField,
) -> Option<KeypadPatch> {
    map_key_at(keypad, row, col, |k| {
        let mut key = k.clone();
        let action = match kind {
            PressKind::Short => &mut key.short_press,
            PressKind::Long => &mut key.long_press,
        };
        match &field {
            ActionField::Mode(mode) => action.mode = *mode,
            ActionField::Key(hid) => action.key = hid.clone(),
            ActionField::Text(text) => action.text = text.clone(),
        }
        key
    })
}

/// Flip `long_press_enabled` for the key at `(row, col)`
pub fn toggle_long_press(keypad: &KeypadConfig, row: u8, col: u8) -> Option<KeypadPatch> {
    map_key_at(keypad, row, col, |k| {
        let mut key = k.clone();
        key.long_press_enabled = !key.long_press_enabled;
        key
    })
}

/// Flip one modifier of one press slot of the key at `(row, col)`
pub fn toggle_modifier(
    keypad: &KeypadConfig,
    row: u8,
    col: u8,
    kind: PressKind,
    modifier: ModifierKey,
) -> Option<KeypadPatch> {
    map_key_at(keypad, row, col, |k| {
        let mut key = k.clone();
        let mods = match kind {
            PressKind::Short => &mut key.short_press.modifiers,
            PressKind::Long => &mut key.long_press.modifiers,
        };
        match modifier {
            ModifierKey::Ctrl => mods.ctrl = !mods.ctrl,
            ModifierKey::Shift => mods.shift = !mods.shift,
            ModifierKey::Alt => mods.alt = !mods.alt,
            ModifierKey::Gui => mods.gui = !mods.gui,
        }
        key
    })
}

/// Replace the pin at `index` of the row or column sequence
///
/// No distinctness validation: assigning a pin already used elsewhere is
/// accepted. The global exclusion list only shapes [`selectable_pins`].
/// An out-of-range index degrades to `None`.
pub fn update_pin(
    keypad: &KeypadConfig,
    axis: PinAxis,
    index: usize,
    pin: u8,
) -> Option<KeypadPatch> {
    if index >= MATRIX_SIZE {
        return None;
    }
    match axis {
        PinAxis::Row => {
            let mut pins = keypad.row_pins;
            pins[index] = pin;
            Some(KeypadPatch::RowPins(pins))
        }
        PinAxis::Col => {
            let mut pins = keypad.col_pins;
            pins[index] = pin;
            Some(KeypadPatch::ColPins(pins))
        }
    }
}

/// Flip the keypad's `enabled` flag
///
/// Disabling hides the rest of the panel but clears nothing; keys and pins
/// survive until re-enabled.
pub fn toggle_enabled(keypad: &KeypadConfig) -> KeypadPatch {
    KeypadPatch::Enabled(!keypad.enabled)
}

/// Pins offered in the selection lists
///
/// A recommended pin is offered if no peripheral uses it, or if it is
/// already one of this keypad's own row/col pins (keeping a pin you own is
/// not a conflict). Pins claimed by a different peripheral are excluded.
pub fn selectable_pins(keypad: &KeypadConfig, all_used: &[u8], recommended: &[u8]) -> Vec<u8> {
    recommended
        .iter()
        .copied()
        .filter(|p| {
            !all_used.contains(p) || keypad.row_pins.contains(p) || keypad.col_pins.contains(p)
        })
        .collect()
}

/// Whether a key should be highlighted as "configured" in the grid
///
/// True when the short press was customized away from the defaults: text
/// mode, a non-default key, or any modifier. Long-press content is ignored
/// here; `long_press_enabled` gets its own indicator in the grid.
pub fn has_custom_action(key: &KeypadKey) -> bool {
    key.short_press.mode == ActionMode::Text
        || key.short_press.key.name != DEFAULT_KEY_NAME
        || key.short_press.modifiers.any()
}

/// Transient editor state
///
/// Lives only for the lifetime of the editor widget; reset on construction
/// and never persisted.
#[derive(Debug, Clone, Default)]
pub struct KeypadEditor {
    selected: Option<KeyPos>,
    show_pin_config: bool,
}

impl KeypadEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected grid cell, if any
    pub fn selected(&self) -> Option<KeyPos> {
        self.selected
    }

    /// Click on a grid cell: same cell deselects, another cell switches
    /// directly without an intermediate deselected state
    pub fn toggle_selected(&mut self, pos: KeyPos) {
        if self.selected == Some(pos) {
            self.selected = None;
        } else {
            self.selected = Some(pos);
        }
    }

    pub fn pin_config_visible(&self) -> bool {
        self.show_pin_config
    }

    pub fn toggle_pin_config(&mut self) {
        self.show_pin_config = !self.show_pin_config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActionConfig, KeyModifiers};
    use proptest::prelude::*;

    fn make_hid_key(name: &str, code: &str) -> HidKey {
        HidKey {
            name: name.to_string(),
            code: code.to_string(),
            description: None,
        }
    }

    fn make_key(row: u8, col: u8, label: &str) -> KeypadKey {
        let default = make_hid_key("KEY_A", "0x04");
        KeypadKey {
            row,
            col,
            label: label.to_string(),
            long_press_enabled: false,
            short_press: ActionConfig::with_key(&default),
            long_press: ActionConfig::with_key(&default),
        }
    }

    /// Sparse keypad: only (0,0) and (1,2) are configured
    fn make_sparse_keypad() -> KeypadConfig {
        KeypadConfig {
            id: "kp1".to_string(),
            enabled: true,
            name: "Keypad 1".to_string(),
            row_pins: [4, 5, 12, 13],
            col_pins: [14, 27, 26, 25],
            keys: vec![make_key(0, 0, "1"), make_key(1, 2, "6")],
        }
    }

    fn keys_of(patch: KeypadPatch) -> Vec<KeypadKey> {
        match patch {
            KeypadPatch::Keys(keys) => keys,
            other => panic!("expected Keys patch, got {}", other),
        }
    }

    #[test]
    fn test_key_at_present_and_absent() {
        let keypad = make_sparse_keypad();

        assert_eq!(key_at(&keypad, 1, 2).unwrap().label, "6");
        assert!(key_at(&keypad, 2, 2).is_none());
    }

    #[test]
    fn test_update_key_action_changes_only_target_field() {
        let keypad = make_sparse_keypad();

        let patch = update_key_action(
            &keypad,
            1,
            2,
            PressKind::Short,
            ActionField::Key(make_hid_key("KEY_ENTER", "0x28")),
        )
        .unwrap();

        let keys = keys_of(patch);
        let target = keys.iter().find(|k| k.row == 1 && k.col == 2).unwrap();
        assert_eq!(target.short_press.key.name, "KEY_ENTER");
        // Untouched fields of the target
        assert_eq!(target.short_press.mode, ActionMode::Key);
        assert_eq!(target.short_press.modifiers, KeyModifiers::default());
        assert_eq!(target.long_press, keypad.keys[1].long_press);
        // Other entries unchanged by value
        let other = keys.iter().find(|k| k.row == 0 && k.col == 0).unwrap();
        assert_eq!(other, &keypad.keys[0]);
    }

    #[test]
    fn test_update_key_action_absent_is_noop() {
        let keypad = make_sparse_keypad();

        assert!(update_key_action(
            &keypad,
            3,
            3,
            PressKind::Short,
            ActionField::Text("hi".to_string())
        )
        .is_none());
    }

    #[test]
    fn test_toggle_long_press_absent_is_noop() {
        let keypad = make_sparse_keypad();
        assert!(toggle_long_press(&keypad, 2, 0).is_none());
    }

    #[test]
    fn test_toggle_modifier_absent_is_noop() {
        let keypad = make_sparse_keypad();
        assert!(toggle_modifier(&keypad, 0, 1, PressKind::Long, ModifierKey::Gui).is_none());
    }

    #[test]
    fn test_toggle_long_press_flips_only_flag() {
        let keypad = make_sparse_keypad();

        let keys = keys_of(toggle_long_press(&keypad, 0, 0).unwrap());
        let target = keys.iter().find(|k| k.row == 0 && k.col == 0).unwrap();
        assert!(target.long_press_enabled);
        assert_eq!(target.short_press, keypad.keys[0].short_press);
        assert_eq!(target.long_press, keypad.keys[0].long_press);
    }

    #[test]
    fn test_mode_switch_preserves_key_and_modifiers() {
        let mut keypad = make_sparse_keypad();
        keypad.keys[0].short_press.key = make_hid_key("KEY_F5", "0x3E");
        keypad.keys[0].short_press.modifiers.ctrl = true;
        keypad.keys[0].short_press.text = "hello".to_string();

        let to_text = keys_of(
            update_key_action(
                &keypad,
                0,
                0,
                PressKind::Short,
                ActionField::Mode(ActionMode::Text),
            )
            .unwrap(),
        );
        let mut keypad_text = keypad.clone();
        keypad_text.keys = to_text;

        let back = keys_of(
            update_key_action(
                &keypad_text,
                0,
                0,
                PressKind::Short,
                ActionField::Mode(ActionMode::Key),
            )
            .unwrap(),
        );

        let target = back.iter().find(|k| k.row == 0 && k.col == 0).unwrap();
        assert_eq!(target.short_press.key.name, "KEY_F5");
        assert!(target.short_press.modifiers.ctrl);
        assert_eq!(target.short_press.text, "hello");
    }

    #[test]
    fn test_update_pin_row_isolation() {
        let keypad = make_sparse_keypad();

        let patch = update_pin(&keypad, PinAxis::Row, 2, 33).unwrap();

        assert_eq!(patch, KeypadPatch::RowPins([4, 5, 33, 13]));
    }

    #[test]
    fn test_update_pin_col_isolation() {
        let keypad = make_sparse_keypad();

        let patch = update_pin(&keypad, PinAxis::Col, 0, 21).unwrap();

        assert_eq!(patch, KeypadPatch::ColPins([21, 27, 26, 25]));
    }

    #[test]
    fn test_update_pin_out_of_range_is_noop() {
        let keypad = make_sparse_keypad();
        assert!(update_pin(&keypad, PinAxis::Row, 4, 33).is_none());
    }

    #[test]
    fn test_update_pin_accepts_overlap() {
        let keypad = make_sparse_keypad();

        // 14 is already col pin 0; assigning it as a row pin is not rejected
        let patch = update_pin(&keypad, PinAxis::Row, 0, 14).unwrap();
        assert_eq!(patch, KeypadPatch::RowPins([14, 5, 12, 13]));
    }

    #[test]
    fn test_toggle_enabled_emits_flag_only() {
        let keypad = make_sparse_keypad();

        assert_eq!(toggle_enabled(&keypad), KeypadPatch::Enabled(false));

        let mut disabled = keypad.clone();
        disabled.enabled = false;
        assert_eq!(toggle_enabled(&disabled), KeypadPatch::Enabled(true));
    }

    #[test]
    fn test_selectable_pins_self_owned_survive_global_use() {
        let mut keypad = make_sparse_keypad();
        keypad.row_pins = [2, 5, 7, 9];

        let offered = selectable_pins(&keypad, &[2, 4, 6], &[2, 4, 5, 7, 9, 10]);

        // 2 is globally used but self-owned; 4 belongs to another peripheral
        assert_eq!(offered, vec![2, 5, 7, 9, 10]);
    }

    #[test]
    fn test_has_custom_action() {
        let mut key = make_key(0, 0, "1");
        assert!(!has_custom_action(&key));

        key.short_press.modifiers.shift = true;
        assert!(has_custom_action(&key));

        let mut key = make_key(0, 0, "1");
        key.short_press.key = make_hid_key("KEY_ENTER", "0x28");
        assert!(has_custom_action(&key));

        let mut key = make_key(0, 0, "1");
        key.short_press.mode = ActionMode::Text;
        assert!(has_custom_action(&key));

        // Long press content alone never lights the cell
        let mut key = make_key(0, 0, "1");
        key.long_press_enabled = true;
        key.long_press.mode = ActionMode::Text;
        key.long_press.modifiers.ctrl = true;
        assert!(!has_custom_action(&key));
    }

    #[test]
    fn test_selection_toggle() {
        let mut editor = KeypadEditor::new();
        let a = KeyPos { row: 0, col: 0 };
        let b = KeyPos { row: 2, col: 3 };

        editor.toggle_selected(a);
        assert_eq!(editor.selected(), Some(a));

        // Clicking another cell switches directly
        editor.toggle_selected(b);
        assert_eq!(editor.selected(), Some(b));

        // Clicking the selected cell deselects
        editor.toggle_selected(b);
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_pin_panel_toggle() {
        let mut editor = KeypadEditor::new();
        assert!(!editor.pin_config_visible());
        editor.toggle_pin_config();
        assert!(editor.pin_config_visible());
        editor.toggle_pin_config();
        assert!(!editor.pin_config_visible());
    }

    fn arb_modifier() -> impl Strategy<Value = ModifierKey> {
        prop_oneof![
            Just(ModifierKey::Ctrl),
            Just(ModifierKey::Shift),
            Just(ModifierKey::Alt),
            Just(ModifierKey::Gui),
        ]
    }

    fn arb_kind() -> impl Strategy<Value = PressKind> {
        prop_oneof![Just(PressKind::Short), Just(PressKind::Long)]
    }

    proptest! {
        /// Toggling a modifier twice is the identity on the whole key list
        #[test]
        fn prop_modifier_double_toggle_roundtrip(
            row in 0u8..2,
            col in 0u8..4,
            kind in arb_kind(),
            modifier in arb_modifier(),
        ) {
            let keypad = make_sparse_keypad();
            match toggle_modifier(&keypad, row, col, kind, modifier) {
                None => prop_assert!(key_at(&keypad, row, col).is_none()),
                Some(first) => {
                    let mut once = keypad.clone();
                    once.keys = keys_of(first);
                    let twice = keys_of(
                        toggle_modifier(&once, row, col, kind, modifier).unwrap(),
                    );
                    prop_assert_eq!(twice, keypad.keys);
                }
            }
        }

        /// A pin update touches exactly one slot of exactly one axis
        #[test]
        fn prop_update_pin_isolation(
            index in 0usize..4,
            pin in 0u8..40,
            row_axis in proptest::bool::ANY,
        ) {
            let keypad = make_sparse_keypad();
            let axis = if row_axis { PinAxis::Row } else { PinAxis::Col };
            let patch = update_pin(&keypad, axis, index, pin).unwrap();
            match patch {
                KeypadPatch::RowPins(pins) => {
                    prop_assert!(row_axis);
                    for i in 0..4 {
                        let expected = if i == index { pin } else { keypad.row_pins[i] };
                        prop_assert_eq!(pins[i], expected);
                    }
                }
                KeypadPatch::ColPins(pins) => {
                    prop_assert!(!row_axis);
                    for i in 0..4 {
                        let expected = if i == index { pin } else { keypad.col_pins[i] };
                        prop_assert_eq!(pins[i], expected);
                    }
                }
                other => prop_assert!(false, "unexpected patch {}", other),
            }
        }
    }
}
