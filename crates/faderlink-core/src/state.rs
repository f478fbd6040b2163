//! Persisted parameter snapshot
//!
//! The host stores plugin state as an opaque blob. We encode it as a flat,
//! ordered YAML mapping:
//!
//! ```yaml
//! gain: 1.5
//! outputGain: 0.2
//! focusedControlId: 1002
//! editorWidth: 600
//! editorHeight: 700
//! ```
//!
//! Each key is read on its own. Missing or badly typed keys fall back to the
//! defaults below and unknown keys are ignored, so state written by older or
//! newer builds still loads.

use crate::params::{
    ParameterStore, DEFAULT_EDITOR_HEIGHT, DEFAULT_EDITOR_WIDTH, DEFAULT_GAIN,
    DEFAULT_OUTPUT_GAIN,
};
use crate::types::ControlId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Errors from decoding persisted state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("State is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Failed to parse state: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("State is not a key/value mapping")]
    NotAMapping,
}

/// One value per store field, in persisted key order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterState {
    pub gain: f32,
    pub output_gain: f32,
    pub focused_control_id: ControlId,
    pub editor_width: u32,
    pub editor_height: u32,
}

impl Default for ParameterState {
    fn default() -> Self {
        Self {
            gain: DEFAULT_GAIN,
            output_gain: DEFAULT_OUTPUT_GAIN,
            focused_control_id: ControlId::FALLBACK_FOCUS,
            editor_width: DEFAULT_EDITOR_WIDTH,
            editor_height: DEFAULT_EDITOR_HEIGHT,
        }
    }
}

impl ParameterState {
    pub fn to_yaml(&self) -> Result<String, StateError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse persisted state, one key at a time
    ///
    /// Only unparseable YAML or a document that is not a mapping is an error.
    pub fn from_yaml(text: &str) -> Result<Self, StateError> {
        let defaults = Self::default();
        let map = match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(map) => map,
            Value::Null => return Ok(defaults),
            _ => return Err(StateError::NotAMapping),
        };

        Ok(Self {
            gain: read_key(&map, "gain", defaults.gain),
            output_gain: read_key(&map, "outputGain", defaults.output_gain),
            focused_control_id: read_key(&map, "focusedControlId", defaults.focused_control_id),
            editor_width: read_key(&map, "editorWidth", defaults.editor_width),
            editor_height: read_key(&map, "editorHeight", defaults.editor_height),
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, StateError> {
        Self::from_yaml(std::str::from_utf8(data)?)
    }
}

/// Read one key, keeping `fallback` when it is absent or has the wrong type
fn read_key<T: DeserializeOwned>(map: &Mapping, key: &str, fallback: T) -> T {
    let Some(value) = map.get(key) else {
        return fallback;
    };
    match serde_yaml::from_value(value.clone()) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("state: Ignoring invalid '{}': {}", key, e);
            fallback
        }
    }
}

impl ParameterStore {
    /// Serialize the current (already clamped) values
    pub fn save_state(&self) -> Result<String, StateError> {
        self.snapshot().to_yaml()
    }

    /// Load serialized state
    ///
    /// On error the store is left untouched.
    pub fn load_state(&self, text: &str) -> Result<(), StateError> {
        let state = ParameterState::from_yaml(text)?;
        log::debug!(
            "load_state: gain={} output_gain={} focused={} editor={}x{}",
            state.gain,
            state.output_gain,
            state.focused_control_id,
            state.editor_width,
            state.editor_height
        );
        self.restore(&state);
        Ok(())
    }
}
