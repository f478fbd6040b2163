//! Conversions between 7-bit MIDI values and the normalized scale
//!
//! Absolute controls send 0-127, which maps linearly onto `0.0..=1.0`.
//! Relative encoders send a tick count whose encoding depends on the
//! controller (see [`EncoderMode`]).

use crate::config::EncoderMode;

const MIDI_MAX: f32 = 127.0;
const MIDI_CENTER: i32 = 64;

/// 0-127 to `0.0..=1.0`
pub fn normalize_cc_value(midi_value: u8) -> f32 {
    midi_value.min(127) as f32 / MIDI_MAX
}

/// `0.0..=1.0` to 0-127 for LED feedback
///
/// Out-of-range and NaN inputs are pinned to the nearest end so a bad reading
/// never produces an invalid MIDI data byte.
pub fn denormalize_to_midi(normalized: f32) -> u8 {
    if normalized.is_nan() {
        return 0;
    }
    (normalized.clamp(0.0, 1.0) * MIDI_MAX).round() as u8
}

/// Decode an encoder CC value into signed ticks (positive = clockwise)
///
/// - `Relative`: 1-63 clockwise, 65-127 counter-clockwise (two's complement
///   style, 127 = -1), 0 and 64 no movement
/// - `RelativeSigned`: offset binary around 64
/// - `Absolute`: distance from center, for completeness
pub fn encoder_to_delta(midi_value: u8, mode: EncoderMode) -> i32 {
    let value = midi_value as i32;
    match mode {
        EncoderMode::Absolute | EncoderMode::RelativeSigned => value - MIDI_CENTER,
        EncoderMode::Relative => match value {
            1..=63 => value,
            65..=127 => value - 128,
            _ => 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cc_value_endpoints() {
        assert_eq!(normalize_cc_value(0), 0.0);
        assert_eq!(normalize_cc_value(127), 1.0);
        assert!((normalize_cc_value(64) - 0.504).abs() < 0.001);
        // Data bytes above 127 are malformed; treat as full scale
        assert_eq!(normalize_cc_value(200), 1.0);
    }

    #[test]
    fn test_denormalize_to_midi() {
        assert_eq!(denormalize_to_midi(0.0), 0);
        assert_eq!(denormalize_to_midi(0.5), 64);
        assert_eq!(denormalize_to_midi(1.0), 127);
        assert_eq!(denormalize_to_midi(1.5), 127);
        assert_eq!(denormalize_to_midi(-0.2), 0);
        assert_eq!(denormalize_to_midi(f32::NAN), 0);
    }

    #[test]
    fn test_encoder_relative() {
        assert_eq!(encoder_to_delta(1, EncoderMode::Relative), 1);
        assert_eq!(encoder_to_delta(5, EncoderMode::Relative), 5);
        assert_eq!(encoder_to_delta(127, EncoderMode::Relative), -1);
        assert_eq!(encoder_to_delta(120, EncoderMode::Relative), -8);
        assert_eq!(encoder_to_delta(64, EncoderMode::Relative), 0);
        assert_eq!(encoder_to_delta(0, EncoderMode::Relative), 0);
    }

    #[test]
    fn test_encoder_relative_signed() {
        assert_eq!(encoder_to_delta(65, EncoderMode::RelativeSigned), 1);
        assert_eq!(encoder_to_delta(63, EncoderMode::RelativeSigned), -1);
        assert_eq!(encoder_to_delta(64, EncoderMode::RelativeSigned), 0);
    }
}
