//! # Preference Storage
//!
//! Presets, the active filter and the chosen sort order survive between sessions.
//! The core never decides where they live: it serializes them to strings and hands
//! them to a [`KeyValueStore`] the caller owns.
//!
//! - [`MemStore`]: in-memory, for tests and embedding
//! - The `todo` client ships a JSON file store
//!
//! Keys are flat strings. The ones the core uses are listed in [`keys`].

mod memory;

pub use memory::MemStore;

use crate::error::Result;

/// Abstract interface for preference storage.
///
/// Methods take `&self`; implementations use interior mutability where needed.
pub trait KeyValueStore {
    /// Load the blob stored under `key`.
    /// Returns Ok(None) if nothing was ever saved there.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value.
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        (**self).save(key, blob)
    }
}

/// Key names used by the core.
pub mod keys {
    pub const ACTIVE_FILTER: &str = "filter.active";
    pub const ACTIVE_PRESET_NUMBER: &str = "filter.active_number";
    pub const SORT_TYPE: &str = "sort.type";

    /// Key of a numbered preset, `filter.preset.<n>`.
    pub fn preset(number: u8) -> String {
        format!("filter.preset.{number}")
    }
}
