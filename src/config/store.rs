//! ConfigStore - owning store for the device configuration
//!
//! Holds the authoritative [`DeviceState`] and notifies subscribers when a
//! keypad patch is applied. Editors only ever see snapshots and hand changes
//! back as [`KeypadPatch`] values; the store is the single writer.

use super::patch::KeypadPatch;
use super::types::{ButtonMapping, DeviceConfig, KeypadConfig};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

type SubscriberFn = Arc<dyn Fn(&str, &KeypadPatch) + Send + Sync>;

/// Everything the device firmware would be flashed with
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceState {
    pub device: DeviceConfig,
    pub keypads: Vec<KeypadConfig>,
    pub buttons: Vec<ButtonMapping>,
}

/// Stores the device configuration and notifies subscribers on updates
#[derive(Clone)]
pub struct ConfigStore {
    state: Arc<RwLock<DeviceState>>,
    subscribers: Arc<RwLock<Vec<SubscriberFn>>>,
}

impl ConfigStore {
    /// Create a store around an initial state
    pub fn new(state: DeviceState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Full snapshot of the current state
    pub fn snapshot(&self) -> DeviceState {
        self.state.read().unwrap().clone()
    }

    /// Device-wide settings
    pub fn device(&self) -> DeviceConfig {
        self.state.read().unwrap().device.clone()
    }

    /// Snapshot of one keypad by id
    pub fn keypad(&self, id: &str) -> Option<KeypadConfig> {
        let state = self.state.read().unwrap();
        state.keypads.iter().find(|k| k.id == id).cloned()
    }

    /// Snapshots of all keypads, in declaration order
    pub fn keypads(&self) -> Vec<KeypadConfig> {
        self.state.read().unwrap().keypads.clone()
    }

    /// Merge a single-field patch into the addressed keypad and notify
    /// subscribers
    ///
    /// An unknown keypad id is dropped with a warning; per the uniform
    /// silent-no-op policy, nothing is created and no subscriber fires.
    pub fn apply(&self, id: &str, patch: KeypadPatch) {
        {
            let mut state = self.state.write().unwrap();
            let Some(keypad) = state.keypads.iter_mut().find(|k| k.id == id) else {
                warn!("Dropping {} patch for unknown keypad '{}'", patch, id);
                return;
            };
            match &patch {
                KeypadPatch::Enabled(enabled) => keypad.enabled = *enabled,
                KeypadPatch::Keys(keys) => keypad.keys = keys.clone(),
                KeypadPatch::RowPins(pins) => keypad.row_pins = *pins,
                KeypadPatch::ColPins(pins) => keypad.col_pins = *pins,
            }
        }
        debug!("Applied {} patch to keypad '{}'", patch, id);

        let subscribers = self.subscribers.read().unwrap();
        for subscriber in subscribers.iter() {
            subscriber(id, &patch);
        }
    }

    /// Replace the device-wide settings
    pub fn update_device(&self, device: DeviceConfig) {
        let mut state = self.state.write().unwrap();
        state.device = device;
    }

    /// Subscribe to applied keypad patches
    ///
    /// Returns the subscriber index.
    pub fn subscribe<F>(&self, listener: F) -> usize
    where
        F: Fn(&str, &KeypadPatch) + Send + Sync + 'static,
    {
        let mut subscribers = self.subscribers.write().unwrap();
        subscribers.push(Arc::new(listener));
        subscribers.len() - 1
    }

    /// All GPIO pins claimed by any peripheral, sorted and deduplicated
    ///
    /// Includes every keypad's row/col pins (enabled or not) and every
    /// standalone button pin. The editor's selectable-pin derivation
    /// re-admits a keypad's own pins from this set.
    pub fn all_used_pins(&self) -> Vec<u8> {
        let state = self.state.read().unwrap();
        let mut pins: Vec<u8> = state
            .keypads
            .iter()
            .flat_map(|k| k.row_pins.iter().chain(k.col_pins.iter()).copied())
            .chain(state.buttons.iter().map(|b| b.pin))
            .collect();
        pins.sort_unstable();
        pins.dedup();
        pins
    }
}
