//! Numbered filter presets persisted through a [`KeyValueStore`].
//!
//! Presets 1–9 hold saved predicates. Preset 0 is the "no filter" sentinel: it is
//! always [`Predicate::All`] and never touches storage. Besides the numbered slots
//! there is an *active* slot holding the predicate currently applied to the list,
//! and the number of the preset it was copied from.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Predicate;
use crate::error::{Result, TodoError};
use crate::store::{keys, KeyValueStore};

/// Highest preset number.
pub const PRESET_COUNT: u8 = 9;

/// Current version of the stored predicate format.
pub const SCHEMA_VERSION: u32 = 1;

/// The stored form of a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetBlob {
    pub version: u32,
    pub predicate: Predicate,
}

/// Only the version is read first, so a newer format fails with a clear error
/// instead of a parse error.
#[derive(Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    predicate: serde_json::Value,
}

/// Serializes a predicate to its stored blob.
pub fn encode_predicate(predicate: &Predicate) -> Result<String> {
    let blob = PresetBlob {
        version: SCHEMA_VERSION,
        predicate: predicate.clone(),
    };
    Ok(serde_json::to_string(&blob)?)
}

/// Parses a stored blob.
///
/// Fails with [`TodoError::UnsupportedSchema`] for unknown versions and
/// [`TodoError::Serialization`] for malformed content.
pub fn decode_predicate(blob: &str) -> Result<Predicate> {
    let envelope: Envelope = serde_json::from_str(blob)?;
    if envelope.version != SCHEMA_VERSION {
        return Err(TodoError::UnsupportedSchema(envelope.version));
    }
    Ok(serde_json::from_value(envelope.predicate)?)
}

/// Nine saved predicates plus the active one, over an explicit store handle.
///
/// ```
/// use todotxtapp::filter::{FilterPresets, Predicate};
/// use todotxtapp::store::MemStore;
///
/// let store = MemStore::new();
/// let presets = FilterPresets::new(&store);
/// assert_eq!(presets.get(0).unwrap(), Predicate::All);
/// ```
pub struct FilterPresets<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FilterPresets<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The default predicate of every numbered slot.
    pub fn default_predicate() -> Predicate {
        Predicate::All
    }

    /// Reads preset `number`. Slots never written hold the default.
    pub fn get(&self, number: u8) -> Result<Predicate> {
        if number == 0 {
            return Ok(Predicate::All);
        }
        check_number(number)?;
        self.load_or_default(&keys::preset(number))
    }

    /// Saves `predicate` as preset `number` (1–9).
    pub fn set(&self, number: u8, predicate: &Predicate) -> Result<()> {
        if number == 0 {
            return Err(TodoError::InvalidArgument(
                "Preset 0 is reserved for \"no filter\"".to_string(),
            ));
        }
        check_number(number)?;
        debug!(preset = number, "Saving filter preset");
        self.store
            .save(&keys::preset(number), &encode_predicate(predicate)?)
    }

    /// Overwrites preset `number` with the default. Preset 0 is left alone.
    pub fn reset(&self, number: u8) -> Result<()> {
        if number == 0 {
            return Ok(());
        }
        self.set(number, &Self::default_predicate())
    }

    pub fn reset_all(&self) -> Result<()> {
        for number in 1..=PRESET_COUNT {
            self.reset(number)?;
        }
        Ok(())
    }

    /// The predicate currently applied to the list.
    pub fn active(&self) -> Result<Predicate> {
        self.load_or_default(keys::ACTIVE_FILTER)
    }

    pub fn set_active(&self, predicate: &Predicate) -> Result<()> {
        debug!("Saving active filter");
        self.store
            .save(keys::ACTIVE_FILTER, &encode_predicate(predicate)?)
    }

    /// Number of the preset last activated; 0 when none was.
    pub fn active_number(&self) -> Result<u8> {
        let Some(stored) = self.store.load(keys::ACTIVE_PRESET_NUMBER)? else {
            return Ok(0);
        };
        match stored.trim().parse::<u8>() {
            Ok(number) if number <= PRESET_COUNT => Ok(number),
            _ => {
                warn!(stored = %stored, "Ignoring unknown active preset number");
                Ok(0)
            }
        }
    }

    /// Copies preset `number` into the active slot and records its number.
    pub fn activate(&self, number: u8) -> Result<Predicate> {
        let predicate = self.get(number)?;
        self.set_active(&predicate)?;
        self.store
            .save(keys::ACTIVE_PRESET_NUMBER, &number.to_string())?;
        debug!(preset = number, "Activated filter preset");
        Ok(predicate)
    }

    fn load_or_default(&self, key: &str) -> Result<Predicate> {
        match self.store.load(key)? {
            Some(blob) => decode_predicate(&blob),
            None => {
                debug!(key, "No stored predicate, using default");
                Ok(Self::default_predicate())
            }
        }
    }
}

fn check_number(number: u8) -> Result<()> {
    if number > PRESET_COUNT {
        return Err(TodoError::InvalidArgument(format!(
            "Preset number must be 0-{PRESET_COUNT}, got {number}"
        )));
    }
    Ok(())
}
