//! Keypad Studio - configuration editor for 4x4 matrix keypad HID devices
//!
//! The owning [`config::ConfigStore`] holds the authoritative device state;
//! the [`editor`] renders read-only snapshots and hands every edit back as
//! a single-field [`config::KeypadPatch`]. Reference data (the HID key
//! [`catalog`] and the board [`profile`]) is supplied to the editor, never
//! defined by it.

pub mod app;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod profile;
