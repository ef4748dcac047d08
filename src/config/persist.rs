use serde::{Deserialize, Serialize};

use super::{CollectMode, CollectionConfig};
use crate::error::{ConfigError, Result};

/// Scalar fields of a [`CollectionConfig`] as stored with the host document.
///
/// Each field is a flat attribute; absent attributes leave the current
/// value untouched on load. The mode is kept as a raw string so unknown
/// values can be recovered from instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersistedSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_counter: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_distance_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_mode: Option<String>,
}

impl CollectionConfig {
    /// Captures the persisted scalar fields.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedSettings {
        PersistedSettings {
            label_base: Some(self.label_base.clone()),
            label_counter: Some(self.label_counter),
            minimum_distance_mm: Some(self.minimum_distance_mm),
            collect_mode: Some(self.mode.as_str().to_owned()),
        }
    }

    /// Applies persisted fields.
    ///
    /// An unrecognized mode falls back to [`CollectMode::Manual`] and an
    /// invalid distance keeps the current value; both are logged.
    pub fn apply_persisted(&mut self, settings: PersistedSettings) {
        if let Some(base) = settings.label_base {
            self.label_base = base;
        }
        if let Some(counter) = settings.label_counter {
            self.label_counter = counter;
        }
        if let Some(distance_mm) = settings.minimum_distance_mm {
            if let Err(err) = self.set_minimum_distance_mm(distance_mm) {
                tracing::warn!(%err, "ignoring persisted minimum distance");
            }
        }
        if let Some(mode) = settings.collect_mode {
            self.mode = mode.parse::<CollectMode>().unwrap_or_else(|err| {
                tracing::warn!(%err, "unrecognized collect mode; setting to manual");
                CollectMode::Manual
            });
        }
    }

    /// Serializes the persisted fields as a JSON attribute object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_persisted()).map_err(ConfigError::from)?)
    }

    /// Loads persisted fields from a JSON attribute object.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid attribute object. Nothing is
    /// applied in that case.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let settings: PersistedSettings =
            serde_json::from_str(json).map_err(ConfigError::from)?;
        self.apply_persisted(settings);
        Ok(())
    }
}
