//! Device configuration: data model, partial updates, and the owning store

pub mod patch;
pub mod store;
pub mod types;

pub use patch::KeypadPatch;
pub use store::{ConfigStore, DeviceState};
pub use types::{
    ActionConfig, ActionMode, ButtonMapping, DeviceConfig, HidKey, KeyModifiers, KeyPos,
    KeypadConfig, KeypadKey, MATRIX_SIZE,
};
