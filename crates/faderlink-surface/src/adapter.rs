//! Hardware input and output adapters
//!
//! - [`HardwareInputAdapter`]: turns [`HardwareControlEvent`]s into binding
//!   updates. [`BindingInputAdapter`] is the registry-backed implementation.
//! - [`HardwareOutputAdapter`]: one-way LED and focus feedback. Calls are
//!   fire-and-forget; delivery problems are an implementation's own business.

use crate::registry::SharedRegistry;
use crate::types::HardwareControlEvent;
use faderlink_core::ControlId;

pub trait HardwareInputAdapter {
    fn process_event(&mut self, event: &HardwareControlEvent);
}

pub trait HardwareOutputAdapter {
    /// Show a control's normalized value (ring LEDs, motor fader, ...)
    fn set_led_value(&mut self, control_id: ControlId, normalized: f32);

    /// Light or clear a control's focus indicator
    fn set_focus(&mut self, control_id: ControlId, focused: bool);
}

/// Routes events to the binding registered for their control
///
/// - unknown control: dropped (hardware may be mapped to controls that are
///   not wired yet)
/// - relative: `clamp(get() + delta, 0, 1)`; the delta is on the normalized
///   scale, so its native size depends on the binding's transform
/// - absolute: `set(value)`
pub struct BindingInputAdapter {
    registry: SharedRegistry,
}

impl BindingInputAdapter {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Apply an event, returning whether a binding handled it
    pub fn route(&self, event: &HardwareControlEvent) -> bool {
        let registry = self.registry.borrow();
        let Some(binding) = registry.find(event.control_id) else {
            log::debug!("input: No binding for control {}, dropping event", event.control_id);
            return false;
        };

        if event.is_relative {
            let next = (binding.get() + event.normalized_value).clamp(0.0, 1.0);
            binding.set(next);
        } else {
            binding.set(event.normalized_value);
        }
        true
    }
}

impl HardwareInputAdapter for BindingInputAdapter {
    fn process_event(&mut self, event: &HardwareControlEvent) {
        self.route(event);
    }
}

/// Output adapter with no device behind it; logs every call
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOutputAdapter;

impl HardwareOutputAdapter for LogOutputAdapter {
    fn set_led_value(&mut self, control_id: ControlId, normalized: f32) {
        log::debug!("[HW OUT] LED id={} value={}", control_id, normalized);
    }

    fn set_focus(&mut self, control_id: ControlId, focused: bool) {
        log::debug!("[HW OUT] FOCUS id={} focused={}", control_id, focused as u8);
    }
}
