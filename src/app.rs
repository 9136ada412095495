//! eframe application shell
//!
//! Owns the [`ConfigStore`], one transient [`KeypadEditor`] per keypad, and
//! the reference data (board profile, key catalog). Each frame renders the
//! device section plus one editor panel per keypad, then applies whatever
//! patches the panels produced back to the store.

use crate::catalog::KeyCatalog;
use crate::config::{
    ActionConfig, ButtonMapping, ConfigStore, DeviceConfig, DeviceState, KeypadConfig,
};
use crate::editor::panel::show_keypad_editor;
use crate::editor::KeypadEditor;
use crate::profile::BoardProfile;
use anyhow::Result;
use tracing::debug;

/// Main application: store + editors + reference data
pub struct StudioApp {
    store: ConfigStore,
    editors: Vec<(String, KeypadEditor)>,
    profile: BoardProfile,
    catalog: KeyCatalog,
}

impl StudioApp {
    /// Build the app around a seeded demo device state
    pub fn new(profile: BoardProfile, catalog: KeyCatalog) -> Self {
        let store = ConfigStore::new(seed_state(&profile, &catalog));
        store.subscribe(|id, patch| {
            debug!("Keypad '{}' updated: {}", id, patch);
        });

        let editors = store
            .keypads()
            .iter()
            .map(|k| (k.id.clone(), KeypadEditor::new()))
            .collect();

        Self {
            store,
            editors,
            profile,
            catalog,
        }
    }

    fn render_device_section(&self, ui: &mut egui::Ui) {
        let mut device = self.store.device();
        let mut changed = false;

        egui::CollapsingHeader::new("Device")
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("device-settings")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Name");
                        changed |= ui.text_edit_singleline(&mut device.name).changed();
                        ui.end_row();

                        ui.label("Manufacturer");
                        changed |= ui.text_edit_singleline(&mut device.manufacturer).changed();
                        ui.end_row();

                        ui.label("Debounce (ms)");
                        changed |= ui
                            .add(egui::DragValue::new(&mut device.debounce_ms).range(1..=200))
                            .changed();
                        ui.end_row();

                        ui.label("Long press (ms)");
                        changed |= ui
                            .add(egui::DragValue::new(&mut device.long_press_ms).range(100..=5000))
                            .changed();
                        ui.end_row();

                        ui.label("Deep sleep");
                        changed |= ui.checkbox(&mut device.deep_sleep_enabled, "").changed();
                        ui.end_row();
                    });
            });

        if changed {
            self.store.update_device(device);
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(egui::RichText::new("Keypad Studio").size(20.0).strong());
                ui.add_space(8.0);

                self.render_device_section(ui);
                ui.add_space(8.0);

                let all_used_pins = self.store.all_used_pins();
                for (id, editor) in &mut self.editors {
                    let Some(keypad) = self.store.keypad(id) else {
                        continue;
                    };
                    ui.separator();
                    let patches = show_keypad_editor(
                        ui,
                        editor,
                        &keypad,
                        &all_used_pins,
                        &self.profile,
                        &self.catalog,
                    );
                    for patch in patches {
                        self.store.apply(id, patch);
                    }
                }
            });
        });
    }
}

/// Demo device: two keypads plus a pair of standalone buttons
///
/// Keypad 1 starts on the profile's default pins; Keypad 2 takes the next
/// free recommended pins and starts disabled.
fn seed_state(profile: &BoardProfile, catalog: &KeyCatalog) -> DeviceState {
    let default_key = catalog.default_key();

    let keypad1 = KeypadConfig::with_default_keys("keypad-1", "Keypad 1", profile, default_key);
    let mut keypad2 = KeypadConfig::with_default_keys("keypad-2", "Keypad 2", profile, default_key);
    keypad2.enabled = false;

    let taken: Vec<u8> = keypad1
        .row_pins
        .iter()
        .chain(keypad1.col_pins.iter())
        .copied()
        .collect();
    let mut free = profile
        .recommended_pins
        .iter()
        .copied()
        .filter(|p| !taken.contains(p));
    for slot in keypad2
        .row_pins
        .iter_mut()
        .chain(keypad2.col_pins.iter_mut())
    {
        if let Some(pin) = free.next() {
            *slot = pin;
        }
    }

    let buttons = free
        .take(2)
        .enumerate()
        .map(|(i, pin)| ButtonMapping {
            id: format!("button-{}", i + 1),
            pin,
            long_press_enabled: false,
            short_press: ActionConfig::with_key(default_key),
            long_press: ActionConfig::with_key(default_key),
        })
        .collect();

    DeviceState {
        device: DeviceConfig::default(),
        keypads: vec![keypad1, keypad2],
        buttons,
    }
}

/// Launch the editor window
///
/// Blocks until the window is closed.
pub fn run(profile: BoardProfile, catalog: KeyCatalog) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Keypad Studio")
            .with_inner_size([520.0, 760.0])
            .with_min_inner_size([420.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Keypad Studio",
        native_options,
        Box::new(|_cc| Ok(Box::new(StudioApp::new(profile, catalog)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run UI: {}", e))
}
