//! Board profiles
//!
//! Reference data about the target microcontroller board: which GPIOs are
//! sensible for matrix scanning, the pins a fresh keypad starts on, and the
//! fixed 4x4 grid of display labels. An ESP32 DevKit profile is embedded;
//! other boards can be loaded from a YAML file via `--profile`.

use crate::config::MATRIX_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

/// Embedded default profile (ESP32 DevKit)
pub const DEFAULT_PROFILE_YAML: &str = include_str!("../data/esp32.yaml");

static DEFAULT_PROFILE: OnceLock<BoardProfile> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("couldn't read board profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid board profile: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// GPIO and labeling reference data for one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardProfile {
    pub name: String,
    /// GPIOs offered in pin selection lists
    pub recommended_pins: Vec<u8>,
    /// Row pins a newly created keypad starts with
    pub default_row_pins: [u8; MATRIX_SIZE],
    /// Column pins a newly created keypad starts with
    pub default_col_pins: [u8; MATRIX_SIZE],
    /// Display labels, indexed `[row][col]`
    pub key_labels: [[String; MATRIX_SIZE]; MATRIX_SIZE],
}

impl BoardProfile {
    /// Parse a profile from YAML content
    pub fn load_from_string(yaml: &str) -> Result<Self, ProfileError> {
        let profile: BoardProfile = serde_yaml::from_str(yaml)?;
        Ok(profile)
    }

    /// Load a profile from a YAML file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let profile = Self::load_from_string(&yaml)?;
        info!("Loaded board profile '{}' from {}", profile.name, path.display());
        Ok(profile)
    }
}

/// Load the embedded default profile (cached after first parse)
pub fn load_default() -> Result<BoardProfile, ProfileError> {
    if let Some(profile) = DEFAULT_PROFILE.get() {
        return Ok(profile.clone());
    }

    let profile = BoardProfile::load_from_string(DEFAULT_PROFILE_YAML)?;
    let _ = DEFAULT_PROFILE.set(profile.clone());
    Ok(profile)
}
