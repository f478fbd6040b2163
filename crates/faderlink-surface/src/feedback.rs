//! MIDI LED feedback
//!
//! [`MidiFeedbackOutput`] is the [`HardwareOutputAdapter`] for MIDI surfaces.
//! It encodes values and focus for the addresses configured in the surface
//! config and hands raw bytes to whoever owns the output port through a
//! `flume` channel. Sending never blocks the UI thread.

use crate::adapter::HardwareOutputAdapter;
use crate::config::SurfaceConfig;
use crate::midi::MidiControl;
use crate::normalize::denormalize_to_midi;
use faderlink_core::ControlId;
use std::collections::HashMap;

/// Queue depth between the editor and the MIDI output thread
pub const FEEDBACK_QUEUE_SIZE: usize = 256;

/// Tracks the last value sent to each address to suppress repeats
#[derive(Debug, Default)]
pub struct FeedbackChangeTracker {
    last_values: HashMap<MidiControl, u8>,
}

impl FeedbackChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value`; returns `true` when it differs from the last one sent
    pub fn update(&mut self, address: MidiControl, value: u8) -> bool {
        self.last_values.insert(address, value) != Some(value)
    }

    /// Whether `value` is what was last sent to `address`
    pub fn is_current(&self, address: MidiControl, value: u8) -> bool {
        self.last_values.get(&address) == Some(&value)
    }

    /// Forget everything (after a reconnect the device state is unknown)
    pub fn clear(&mut self) {
        self.last_values.clear();
    }

    pub fn tracked_addresses(&self) -> impl Iterator<Item = &MidiControl> {
        self.last_values.keys()
    }
}

pub struct MidiFeedbackOutput {
    tx: flume::Sender<Vec<u8>>,
    led: HashMap<ControlId, MidiControl>,
    focus: HashMap<ControlId, MidiControl>,
    tracker: FeedbackChangeTracker,
}

impl MidiFeedbackOutput {
    pub fn new(config: &SurfaceConfig, tx: flume::Sender<Vec<u8>>) -> Self {
        let mut led = HashMap::new();
        let mut focus = HashMap::new();
        for mapping in &config.feedback {
            if let Some(address) = mapping.led {
                led.insert(mapping.control_id, address);
            }
            if let Some(address) = mapping.focus {
                focus.insert(mapping.control_id, address);
            }
        }

        Self {
            tx,
            led,
            focus,
            tracker: FeedbackChangeTracker::new(),
        }
    }

    /// Create an output together with the receiving end of its byte queue
    pub fn channel(config: &SurfaceConfig) -> (Self, flume::Receiver<Vec<u8>>) {
        let (tx, rx) = flume::bounded(FEEDBACK_QUEUE_SIZE);
        (Self::new(config, tx), rx)
    }

    /// Resend everything on the next update
    pub fn reset(&mut self) {
        self.tracker.clear();
    }

    /// Queue a message; only delivered values count as sent
    fn send(&mut self, address: MidiControl, value: u8) {
        if self.tracker.is_current(address, value) {
            return;
        }

        let message = address.message(value);
        log::trace!("feedback: {:02X?}", message);
        match self.tx.try_send(message.to_vec()) {
            Ok(()) => {
                self.tracker.update(address, value);
            }
            Err(e) => log::warn!("feedback: Dropping {:02X?}: {}", message, e),
        }
    }
}

impl HardwareOutputAdapter for MidiFeedbackOutput {
    fn set_led_value(&mut self, control_id: ControlId, normalized: f32) {
        if let Some(&address) = self.led.get(&control_id) {
            self.send(address, denormalize_to_midi(normalized));
        }
    }

    fn set_focus(&mut self, control_id: ControlId, focused: bool) {
        if let Some(&address) = self.focus.get(&control_id) {
            self.send(address, if focused { 127 } else { 0 });
        }
    }
}
