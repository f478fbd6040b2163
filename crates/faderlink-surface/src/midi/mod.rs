//! MIDI byte handling
//!
//! Port I/O belongs to the host. This module only parses incoming bytes and
//! encodes outgoing LED messages.

pub mod input;

pub use input::{MidiControl, MidiInputEvent};
