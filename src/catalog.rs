//! HID key catalog
//!
//! Parses the embedded CSV of USB HID usage-page-0x07 keycodes into a
//! lookup table. The catalog is reference data: the editor selects entries
//! from it but never defines keycodes itself.

use crate::config::HidKey;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::info;

/// Name of the conventional default/no-op key
///
/// Freshly seeded actions point at this key; the grid-highlight heuristic
/// treats a short press still bound to it as "not customized".
pub const DEFAULT_KEY_NAME: &str = "KEY_A";

/// Embedded catalog content
pub const DEFAULT_CSV: &str = include_str!("../data/hid_keys.csv");

/// Global cache for the embedded default catalog
static DEFAULT_CATALOG: OnceLock<KeyCatalog> = OnceLock::new();

/// Lookup table of selectable HID keys
#[derive(Debug, Clone)]
pub struct KeyCatalog {
    keys: Vec<HidKey>,
    by_name: HashMap<String, usize>,
    default_idx: usize,
}

impl KeyCatalog {
    /// Parse catalog CSV content (columns: name, code, description)
    pub fn load_from_string(csv_content: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(csv_content.as_bytes());
        let mut keys: Vec<HidKey> = Vec::new();
        let mut by_name = HashMap::new();

        for result in reader.deserialize() {
            let key: HidKey = result.context("Failed to parse catalog row")?;
            if by_name.contains_key(&key.name) {
                anyhow::bail!("Duplicate key name in catalog: {}", key.name);
            }
            u8::from_str_radix(key.code.trim_start_matches("0x"), 16)
                .with_context(|| format!("Invalid usage code for {}: {}", key.name, key.code))?;
            by_name.insert(key.name.clone(), keys.len());
            keys.push(key);
        }

        let default_idx = *by_name
            .get(DEFAULT_KEY_NAME)
            .with_context(|| format!("Catalog is missing the default key {}", DEFAULT_KEY_NAME))?;

        info!("Loaded {} HID keys", keys.len());

        Ok(Self {
            keys,
            by_name,
            default_idx,
        })
    }

    /// All keys in catalog order
    pub fn keys(&self) -> &[HidKey] {
        &self.keys
    }

    /// Look up a key by catalog name
    pub fn get(&self, name: &str) -> Option<&HidKey> {
        self.by_name.get(name).map(|&i| &self.keys[i])
    }

    /// The conventional default key (see [`DEFAULT_KEY_NAME`])
    pub fn default_key(&self) -> &HidKey {
        &self.keys[self.default_idx]
    }
}

/// Load the embedded default catalog (cached after first parse)
pub fn load_default() -> Result<KeyCatalog> {
    if let Some(catalog) = DEFAULT_CATALOG.get() {
        return Ok(catalog.clone());
    }

    let catalog = KeyCatalog::load_from_string(DEFAULT_CSV)?;
    // Ignore error if another thread set it first
    let _ = DEFAULT_CATALOG.set(catalog.clone());
    Ok(catalog)
}
