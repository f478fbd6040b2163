//! Protocol-agnostic hardware contract
//!
//! Whatever the physical transport (MIDI, keyboard, HID), input ends up as a
//! [`HardwareControlEvent`] addressed by [`ControlId`], and the surface
//! describes its controls with [`HardwareControlDescriptor`].

use faderlink_core::ControlId;
use serde::{Deserialize, Serialize};

/// Physical control kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareControlType {
    Encoder,
    Fader,
    Button,
    Touch,
    Led,
    Display,
}

/// One input event addressed to a control
///
/// `normalized_value` is an absolute position in `0.0..=1.0` when
/// `is_relative` is false, and a signed delta on the normalized scale when it
/// is true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareControlEvent {
    pub control_id: ControlId,
    pub normalized_value: f32,
    pub is_relative: bool,
}

impl HardwareControlEvent {
    pub fn absolute(control_id: ControlId, normalized_value: f32) -> Self {
        Self {
            control_id,
            normalized_value,
            is_relative: false,
        }
    }

    pub fn relative(control_id: ControlId, delta: f32) -> Self {
        Self {
            control_id,
            normalized_value: delta,
            is_relative: true,
        }
    }
}

/// Capabilities of one physical control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareControlDescriptor {
    pub control_id: ControlId,
    pub control_type: HardwareControlType,
    pub supports_touch: bool,
    pub supports_led_feedback: bool,
}
