//! egui rendering for the keypad editor
//!
//! Renders one keypad panel (header, pin configuration, 4x4 grid, selected
//! key editor) against a read-only snapshot and returns the patches the
//! frame's gestures produced. All state changes flow out as
//! [`KeypadPatch`] values; only the transient [`KeypadEditor`] is mutated
//! here.

use super::{
    has_custom_action, key_at, selectable_pins, toggle_enabled, toggle_long_press,
    toggle_modifier, update_key_action, update_pin, ActionField, KeypadEditor, ModifierKey,
    PinAxis, PressKind,
};
use crate::catalog::KeyCatalog;
use crate::config::{
    ActionMode, HidKey, KeyModifiers, KeyPos, KeypadConfig, KeypadPatch, MATRIX_SIZE,
};
use crate::profile::BoardProfile;

const CELL_SIZE: f32 = 48.0;

const FILL_SELECTED: egui::Color32 = egui::Color32::from_rgb(16, 90, 60);
const FILL_CONFIGURED: egui::Color32 = egui::Color32::from_rgb(30, 55, 70);
const FILL_PLAIN: egui::Color32 = egui::Color32::from_gray(40);

/// Render one keypad editor panel
///
/// Returns the patches produced by this frame's interactions, in gesture
/// order. The caller applies them to the owning store.
pub fn show_keypad_editor(
    ui: &mut egui::Ui,
    editor: &mut KeypadEditor,
    keypad: &KeypadConfig,
    all_used_pins: &[u8],
    profile: &BoardProfile,
    catalog: &KeyCatalog,
) -> Vec<KeypadPatch> {
    let mut patches = Vec::new();

    ui.horizontal(|ui| {
        ui.heading(&keypad.name);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if keypad.enabled { "Enabled" } else { "Disabled" };
            if ui.selectable_label(keypad.enabled, label).clicked() {
                patches.push(toggle_enabled(keypad));
            }
        });
    });

    // Disabled keypads keep their configuration but render nothing else
    if !keypad.enabled {
        return patches;
    }

    let chevron = if editor.pin_config_visible() {
        "⏶"
    } else {
        "⏷"
    };
    if ui
        .small_button(format!("GPIO Pin Configuration {}", chevron))
        .clicked()
    {
        editor.toggle_pin_config();
    }
    if editor.pin_config_visible() {
        render_pin_config(ui, keypad, all_used_pins, profile, &mut patches);
    }

    ui.add_space(8.0);
    render_key_grid(ui, editor, keypad, profile);

    if let Some(pos) = editor.selected() {
        render_selected_key(ui, keypad, pos, catalog, &mut patches);
    }

    patches
}

/// Render the row/col pin selectors
///
/// Offers only the pins [`selectable_pins`] derives; direct overlap between
/// two of this keypad's own selectors is still possible and accepted.
fn render_pin_config(
    ui: &mut egui::Ui,
    keypad: &KeypadConfig,
    all_used_pins: &[u8],
    profile: &BoardProfile,
    patches: &mut Vec<KeypadPatch>,
) {
    let offered = selectable_pins(keypad, all_used_pins, &profile.recommended_pins);

    let axes = [
        (PinAxis::Row, "Row pins (R0-R3)", &keypad.row_pins),
        (PinAxis::Col, "Col pins (C0-C3)", &keypad.col_pins),
    ];
    for (axis, title, pins) in axes {
        ui.label(egui::RichText::new(title).small().strong());
        ui.horizontal(|ui| {
            for (index, current) in pins.iter().enumerate() {
                egui::ComboBox::from_id_salt((keypad.id.clone(), title, index))
                    .selected_text(format!("GPIO {}", current))
                    .width(86.0)
                    .show_ui(ui, |ui| {
                        for pin in &offered {
                            if ui
                                .selectable_label(pin == current, format!("GPIO {}", pin))
                                .clicked()
                            {
                                if let Some(patch) = update_pin(keypad, axis, index, *pin) {
                                    patches.push(patch);
                                }
                            }
                        }
                    });
            }
        });
    }
}

/// Render the 4x4 key grid
///
/// Iterates the profile's label grid so all 16 coordinates render whether
/// or not a key entry exists for them. Clicking a cell toggles selection.
fn render_key_grid(
    ui: &mut egui::Ui,
    editor: &mut KeypadEditor,
    keypad: &KeypadConfig,
    profile: &BoardProfile,
) {
    for row in 0..MATRIX_SIZE {
        ui.horizontal(|ui| {
            for col in 0..MATRIX_SIZE {
                let pos = KeyPos {
                    row: row as u8,
                    col: col as u8,
                };
                let key = key_at(keypad, pos.row, pos.col);
                let is_selected = editor.selected() == Some(pos);
                let configured = key.map(has_custom_action).unwrap_or(false);
                let long_press = key.map(|k| k.long_press_enabled).unwrap_or(false);

                let mut label = profile.key_labels[row][col].clone();
                if long_press {
                    label.push_str("\n⏱");
                }
                let fill = if is_selected {
                    FILL_SELECTED
                } else if configured {
                    FILL_CONFIGURED
                } else {
                    FILL_PLAIN
                };

                let button = egui::Button::new(egui::RichText::new(label).strong()).fill(fill);
                if ui.add_sized([CELL_SIZE, CELL_SIZE], button).clicked() {
                    editor.toggle_selected(pos);
                }
            }
        });
    }
}

/// Render the editor for the selected key
///
/// Bails out when no entry backs the selected coordinate; such a cell can
/// be selected but offers no edit controls, so no patch can ever address it.
fn render_selected_key(
    ui: &mut egui::Ui,
    keypad: &KeypadConfig,
    pos: KeyPos,
    catalog: &KeyCatalog,
    patches: &mut Vec<KeypadPatch>,
) {
    let Some(key) = key_at(keypad, pos.row, pos.col) else {
        return;
    };

    ui.add_space(8.0);
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label("Key:");
            ui.label(egui::RichText::new(&key.label).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut long_press = key.long_press_enabled;
                if ui.checkbox(&mut long_press, "Long press").changed() {
                    if let Some(patch) = toggle_long_press(keypad, pos.row, pos.col) {
                        patches.push(patch);
                    }
                }
            });
        });

        render_action_editor(ui, keypad, pos, PressKind::Short, catalog, patches);
        if key.long_press_enabled {
            render_action_editor(ui, keypad, pos, PressKind::Long, catalog, patches);
        }
    });
}

/// Render one press slot's action editor (mode switch, key + modifiers or
/// text field)
fn render_action_editor(
    ui: &mut egui::Ui,
    keypad: &KeypadConfig,
    pos: KeyPos,
    kind: PressKind,
    catalog: &KeyCatalog,
    patches: &mut Vec<KeypadPatch>,
) {
    let Some(key) = key_at(keypad, pos.row, pos.col) else {
        return;
    };
    let action = match kind {
        PressKind::Short => &key.short_press,
        PressKind::Long => &key.long_press,
    };

    ui.group(|ui| {
        ui.label(
            egui::RichText::new(kind.as_str().to_uppercase())
                .small()
                .strong()
                .color(egui::Color32::from_gray(160)),
        );

        ui.horizontal(|ui| {
            let modes = [(ActionMode::Key, "Key"), (ActionMode::Text, "Text")];
            for (mode, label) in modes {
                if ui.selectable_label(action.mode == mode, label).clicked()
                    && action.mode != mode
                {
                    if let Some(patch) =
                        update_key_action(keypad, pos.row, pos.col, kind, ActionField::Mode(mode))
                    {
                        patches.push(patch);
                    }
                }
            }
        });

        match action.mode {
            ActionMode::Key => {
                egui::ComboBox::from_id_salt((keypad.id.clone(), kind.as_str(), pos))
                    .selected_text(display_name(&action.key))
                    .width(160.0)
                    .show_ui(ui, |ui| {
                        for candidate in catalog.keys() {
                            if ui
                                .selectable_label(
                                    candidate.name == action.key.name,
                                    display_name(candidate),
                                )
                                .clicked()
                            {
                                if let Some(patch) = update_key_action(
                                    keypad,
                                    pos.row,
                                    pos.col,
                                    kind,
                                    ActionField::Key(candidate.clone()),
                                ) {
                                    patches.push(patch);
                                }
                            }
                        }
                    });

                ui.horizontal(|ui| {
                    for modifier in ModifierKey::all() {
                        let active = modifier_active(&action.modifiers, *modifier);
                        if ui.selectable_label(active, modifier.as_str()).clicked() {
                            if let Some(patch) =
                                toggle_modifier(keypad, pos.row, pos.col, kind, *modifier)
                            {
                                patches.push(patch);
                            }
                        }
                    }
                });
            }
            ActionMode::Text => {
                let mut text = action.text.clone();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut text)
                            .hint_text("Text to type...")
                            .desired_width(f32::INFINITY),
                    )
                    .changed()
                {
                    if let Some(patch) = update_key_action(
                        keypad,
                        pos.row,
                        pos.col,
                        kind,
                        ActionField::Text(text),
                    ) {
                        patches.push(patch);
                    }
                }
            }
        }
    });
}

/// Catalog name without the `KEY_` prefix, as shown in selection lists
fn display_name(key: &HidKey) -> String {
    key.name.trim_start_matches("KEY_").to_string()
}

fn modifier_active(modifiers: &KeyModifiers, modifier: ModifierKey) -> bool {
    match modifier {
        ModifierKey::Ctrl => modifiers.ctrl,
        ModifierKey::Shift => modifiers.shift,
        ModifierKey::Alt => modifiers.alt,
        ModifierKey::Gui => modifiers.gui,
    }
}
