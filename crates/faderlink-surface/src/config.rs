//! Control-surface mapping schema and loader
//!
//! The mapping is stored as YAML next to the other faderlink settings.
//! Default location: `<config_dir>/faderlink/surface.yaml`
//!
//! ```yaml
//! name: Generic encoder box
//! mappings:
//!   - control: { type: control_change, channel: 0, cc: 16 }
//!     target: focused
//!     encoder_mode: relative
//!     step: 0.01
//!   - control: { type: note, channel: 0, note: 16 }
//!     target: focused
//!     behavior: focus
//! keys:
//!   - key: h
//!     target: 1001
//!     value: 0.375
//! feedback:
//!   - control_id: 1001
//!     led: { type: control_change, channel: 0, cc: 16 }
//!     focus: { type: note, channel: 0, note: 16 }
//! ```

use crate::midi::MidiControl;
use crate::types::HardwareControlType;
use faderlink_core::config::{default_config_path, load_config, save_config};
use faderlink_core::ControlId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the surface mapping inside the config directory
pub const SURFACE_CONFIG_FILE: &str = "surface.yaml";

/// Normalized change per encoder tick or button press when none is configured
pub const DEFAULT_STEP: f32 = 0.01;

/// Root surface configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Human-readable surface name (shown in logs only)
    pub name: String,

    /// MIDI control to parameter mappings
    pub mappings: Vec<ControlMapping>,

    /// Computer-keyboard shortcuts
    pub keys: Vec<KeyMapping>,

    /// LED and focus-indicator addresses per control
    pub feedback: Vec<FeedbackMapping>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            name: "Keyboard".to_string(),
            mappings: Vec::new(),
            keys: vec![
                KeyMapping {
                    key: 'h',
                    target: MappingTarget::Control(ControlId::GAIN),
                    // Normalized; gain 0.75 on the 0..2 scale
                    value: 0.375,
                    relative: false,
                },
                KeyMapping {
                    key: '[',
                    target: MappingTarget::Focused,
                    value: -0.05,
                    relative: true,
                },
                KeyMapping {
                    key: ']',
                    target: MappingTarget::Focused,
                    value: 0.05,
                    relative: true,
                },
            ],
            feedback: Vec::new(),
        }
    }
}

/// Which control an input acts on
///
/// In YAML either a bare control id (`target: 1001`) or `target: focused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TargetRepr", into = "TargetRepr")]
pub enum MappingTarget {
    /// Always the same control
    Control(ControlId),
    /// Whichever control currently has focus
    Focused,
}

impl MappingTarget {
    /// Resolve against the current focus; `Focused` with nothing focused is `None`
    pub fn resolve(self, focused: Option<ControlId>) -> Option<ControlId> {
        match self {
            Self::Control(id) => Some(id),
            Self::Focused => focused,
        }
    }

    pub fn fixed(self) -> Option<ControlId> {
        match self {
            Self::Control(id) => Some(id),
            Self::Focused => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Id(ControlId),
    Keyword(TargetKeyword),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TargetKeyword {
    Focused,
}

impl From<TargetRepr> for MappingTarget {
    fn from(repr: TargetRepr) -> Self {
        match repr {
            TargetRepr::Id(id) => Self::Control(id),
            TargetRepr::Keyword(TargetKeyword::Focused) => Self::Focused,
        }
    }
}

impl From<MappingTarget> for TargetRepr {
    fn from(target: MappingTarget) -> Self {
        match target {
            MappingTarget::Control(id) => Self::Id(id),
            MappingTarget::Focused => Self::Keyword(TargetKeyword::Focused),
        }
    }
}

/// What a mapped control does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlBehavior {
    /// Changes the target's value
    #[default]
    Continuous,
    /// A press focuses the target (touch-sensitive encoders, select buttons)
    Focus,
}

/// How a CC value is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderMode {
    /// 0-127 is the absolute position (faders, pots)
    #[default]
    Absolute,
    /// Two's complement ticks: 1-63 up, 65-127 down
    Relative,
    /// Offset binary ticks around 64
    RelativeSigned,
}

/// One MIDI control mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMapping {
    /// MIDI address of the physical control
    pub control: MidiControl,

    pub target: MappingTarget,

    #[serde(default)]
    pub behavior: ControlBehavior,

    #[serde(default)]
    pub encoder_mode: EncoderMode,

    /// Normalized change per encoder tick, or per press for a note mapped as
    /// `continuous` (negative steps make "down" buttons)
    #[serde(default = "default_step")]
    pub step: f32,

    /// Physical kind, when it cannot be inferred from the message type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_type: Option<HardwareControlType>,
}

fn default_step() -> f32 {
    DEFAULT_STEP
}

impl ControlMapping {
    /// Physical kind, inferred from the MIDI address when not configured
    pub fn control_type(&self) -> HardwareControlType {
        if let Some(kind) = self.hardware_type {
            return kind;
        }
        match (self.control, self.behavior, self.encoder_mode) {
            (_, ControlBehavior::Focus, _) => HardwareControlType::Touch,
            (MidiControl::Note { .. }, _, _) => HardwareControlType::Button,
            (MidiControl::ControlChange { .. }, _, EncoderMode::Absolute) => {
                HardwareControlType::Fader
            }
            (MidiControl::ControlChange { .. }, _, _) => HardwareControlType::Encoder,
        }
    }
}

/// One computer-keyboard shortcut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMapping {
    pub key: char,
    pub target: MappingTarget,
    /// Absolute normalized position, or a normalized delta when `relative`
    pub value: f32,
    #[serde(default)]
    pub relative: bool,
}

/// Feedback addresses for one control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMapping {
    pub control_id: ControlId,

    /// Receives the control's value as CC (ring LEDs, motor faders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led: Option<MidiControl>,

    /// Receives Note On 127 / Note Off when focus changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<MidiControl>,
}

/// Default surface config path
pub fn default_surface_config_path() -> PathBuf {
    default_config_path(SURFACE_CONFIG_FILE)
}

/// Load the surface config, falling back to [`SurfaceConfig::default`]
pub fn load_surface_config(path: &Path) -> SurfaceConfig {
    let config: SurfaceConfig = load_config(path);
    log::info!(
        "load_surface_config: '{}' with {} mappings, {} keys, {} feedback entries",
        config.name,
        config.mappings.len(),
        config.keys.len(),
        config.feedback.len()
    );
    config
}

/// Save the surface config
pub fn save_surface_config(config: &SurfaceConfig, path: &Path) -> anyhow::Result<()> {
    save_config(config, path)
}
