//! Raw MIDI message parsing and control addressing

use serde::{Deserialize, Serialize};

/// Address of one MIDI control (Note or CC on a channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MidiControl {
    Note {
        /// MIDI channel (0-15)
        channel: u8,
        /// Note number (0-127)
        note: u8,
    },
    ControlChange {
        /// MIDI channel (0-15)
        channel: u8,
        /// CC number (0-127)
        cc: u8,
    },
}

impl MidiControl {
    pub fn note(channel: u8, note: u8) -> Self {
        Self::Note { channel, note }
    }

    pub fn cc(channel: u8, cc: u8) -> Self {
        Self::ControlChange { channel, cc }
    }

    pub fn channel(&self) -> u8 {
        match self {
            Self::Note { channel, .. } | Self::ControlChange { channel, .. } => *channel,
        }
    }

    /// Encode a feedback message carrying `value` to this control
    ///
    /// Notes become Note On (value > 0) or Note Off (value == 0).
    pub fn message(&self, value: u8) -> [u8; 3] {
        let value = value & 0x7F;
        match *self {
            Self::Note { channel, note } if value > 0 => [0x90 | (channel & 0x0F), note & 0x7F, value],
            Self::Note { channel, note } => [0x80 | (channel & 0x0F), note & 0x7F, 0],
            Self::ControlChange { channel, cc } => [0xB0 | (channel & 0x0F), cc & 0x7F, value],
        }
    }
}

/// Parsed channel voice message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiInputEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, cc: u8, value: u8 },
}

impl MidiInputEvent {
    /// Parse one message
    ///
    /// - `0x8n note vel`: Note Off
    /// - `0x9n note vel`: Note On (velocity 0 is reported as Note Off)
    /// - `0xBn cc value`: Control Change
    ///
    /// Anything else (pitch bend, aftertouch, sysex, truncated data) is `None`.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let [status, d1, d2, ..] = *data else {
            return None;
        };
        let channel = status & 0x0F;

        match status & 0xF0 {
            0x80 => Some(Self::NoteOff {
                channel,
                note: d1,
                velocity: d2,
            }),
            0x90 if d2 == 0 => Some(Self::NoteOff {
                channel,
                note: d1,
                velocity: 0,
            }),
            0x90 => Some(Self::NoteOn {
                channel,
                note: d1,
                velocity: d2,
            }),
            0xB0 => Some(Self::ControlChange {
                channel,
                cc: d1,
                value: d2,
            }),
            _ => None,
        }
    }

    /// Control this message came from
    pub fn control(&self) -> MidiControl {
        match *self {
            Self::NoteOn { channel, note, .. } | Self::NoteOff { channel, note, .. } => {
                MidiControl::note(channel, note)
            }
            Self::ControlChange { channel, cc, .. } => MidiControl::cc(channel, cc),
        }
    }

    /// Note On, or a CC in the upper half (momentary CC buttons)
    pub fn is_press(&self) -> bool {
        match self {
            Self::NoteOn { .. } => true,
            Self::NoteOff { .. } => false,
            Self::ControlChange { value, .. } => *value > 63,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_on_off() {
        assert_eq!(
            MidiInputEvent::parse(&[0x91, 0x3C, 0x64]),
            Some(MidiInputEvent::NoteOn {
                channel: 1,
                note: 0x3C,
                velocity: 0x64
            })
        );
        assert_eq!(
            MidiInputEvent::parse(&[0x80, 0x3C, 0x40]),
            Some(MidiInputEvent::NoteOff {
                channel: 0,
                note: 0x3C,
                velocity: 0x40
            })
        );
    }

    #[test]
    fn test_note_on_zero_velocity_is_note_off() {
        let event = MidiInputEvent::parse(&[0x90, 0x10, 0x00]).unwrap();
        assert!(matches!(event, MidiInputEvent::NoteOff { velocity: 0, .. }));
        assert!(!event.is_press());
    }

    #[test]
    fn test_parse_cc() {
        let event = MidiInputEvent::parse(&[0xB2, 0x07, 0x7F]).unwrap();
        assert_eq!(event.control(), MidiControl::cc(2, 7));
        assert!(event.is_press());
    }

    #[test]
    fn test_parse_ignores_other_messages() {
        assert_eq!(MidiInputEvent::parse(&[]), None);
        assert_eq!(MidiInputEvent::parse(&[0x90, 0x3C]), None);
        assert_eq!(MidiInputEvent::parse(&[0xE0, 0x00, 0x40]), None); // pitch bend
        assert_eq!(MidiInputEvent::parse(&[0xF0, 0x7E, 0x7F, 0xF7]), None); // sysex
    }

    #[test]
    fn test_feedback_messages() {
        assert_eq!(MidiControl::note(0, 0x10).message(127), [0x90, 0x10, 0x7F]);
        assert_eq!(MidiControl::note(3, 0x10).message(0), [0x83, 0x10, 0x00]);
        assert_eq!(MidiControl::cc(15, 0x20).message(64), [0xBF, 0x20, 0x40]);
    }

    #[test]
    fn test_yaml_address_format() {
        let control: MidiControl =
            serde_yaml::from_str("type: control_change\nchannel: 0\ncc: 16\n").unwrap();
        assert_eq!(control, MidiControl::cc(0, 16));
        assert_eq!(control.channel(), 0);
    }
}
