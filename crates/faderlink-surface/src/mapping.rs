//! Raw input to surface actions
//!
//! The [`MappingEngine`] is built once from a [`SurfaceConfig`] and answers
//! "what does this MIDI message / key press mean". It knows nothing about
//! focus or bindings; targets stay unresolved until the view applies them.

use crate::config::{ControlBehavior, ControlMapping, EncoderMode, KeyMapping, MappingTarget, SurfaceConfig};
use crate::midi::{MidiControl, MidiInputEvent};
use crate::normalize::{encoder_to_delta, normalize_cc_value};
use crate::types::{HardwareControlDescriptor, HardwareControlEvent};
use faderlink_core::ControlId;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Outcome of one raw input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceAction {
    /// Set (or nudge, when `relative`) the target's normalized value
    Adjust {
        target: MappingTarget,
        value: f32,
        relative: bool,
    },
    /// Move focus to the target
    Focus(MappingTarget),
}

impl SurfaceAction {
    /// Turn an `Adjust` into a hardware event for the currently focused control
    ///
    /// `None` for `Focus` actions and for `focused` targets with nothing focused.
    pub fn to_event(&self, focused: Option<ControlId>) -> Option<HardwareControlEvent> {
        match *self {
            Self::Adjust {
                target,
                value,
                relative,
            } => {
                let control_id = target.resolve(focused)?;
                Some(if relative {
                    HardwareControlEvent::relative(control_id, value)
                } else {
                    HardwareControlEvent::absolute(control_id, value)
                })
            }
            Self::Focus(_) => None,
        }
    }
}

pub struct MappingEngine {
    midi: HashMap<MidiControl, ControlMapping>,
    keys: HashMap<char, KeyMapping>,
    led_feedback: HashSet<ControlId>,
}

impl MappingEngine {
    pub fn new(config: &SurfaceConfig) -> Self {
        let mut midi = HashMap::with_capacity(config.mappings.len());
        for mapping in &config.mappings {
            if midi.insert(mapping.control, mapping.clone()).is_some() {
                log::warn!(
                    "mapping: {:?} mapped more than once, keeping the last entry",
                    mapping.control
                );
            }
        }

        let keys = config.keys.iter().map(|k| (k.key, k.clone())).collect();

        let led_feedback = config
            .feedback
            .iter()
            .filter(|f| f.led.is_some())
            .map(|f| f.control_id)
            .collect();

        log::debug!(
            "mapping: Built engine for '{}' ({} MIDI, {} keys)",
            config.name,
            config.mappings.len(),
            config.keys.len()
        );

        Self {
            midi,
            keys,
            led_feedback,
        }
    }

    /// Interpret a parsed MIDI message
    pub fn map_midi(&self, event: &MidiInputEvent) -> Option<SurfaceAction> {
        let mapping = self.midi.get(&event.control())?;

        match mapping.behavior {
            ControlBehavior::Focus => event
                .is_press()
                .then_some(SurfaceAction::Focus(mapping.target)),
            ControlBehavior::Continuous => Self::map_continuous(mapping, event),
        }
    }

    fn map_continuous(mapping: &ControlMapping, event: &MidiInputEvent) -> Option<SurfaceAction> {
        match *event {
            MidiInputEvent::ControlChange { value, .. } => match mapping.encoder_mode {
                EncoderMode::Absolute => Some(SurfaceAction::Adjust {
                    target: mapping.target,
                    value: normalize_cc_value(value),
                    relative: false,
                }),
                mode => {
                    let ticks = encoder_to_delta(value, mode);
                    (ticks != 0).then(|| SurfaceAction::Adjust {
                        target: mapping.target,
                        value: ticks as f32 * mapping.step,
                        relative: true,
                    })
                }
            },
            // A note mapped as continuous is a step button
            MidiInputEvent::NoteOn { .. } => Some(SurfaceAction::Adjust {
                target: mapping.target,
                value: mapping.step,
                relative: true,
            }),
            MidiInputEvent::NoteOff { .. } => None,
        }
    }

    /// Interpret a key press; falls back to the lowercase key
    pub fn map_key(&self, key: char) -> Option<SurfaceAction> {
        let mapping = self
            .keys
            .get(&key)
            .or_else(|| key.to_lowercase().next().and_then(|k| self.keys.get(&k)))?;

        Some(SurfaceAction::Adjust {
            target: mapping.target,
            value: mapping.value,
            relative: mapping.relative,
        })
    }

    /// Capabilities of the physical controls bound to fixed targets
    ///
    /// One descriptor per control id. Continuous mappings decide the control
    /// type; focus mappings on the same id mark it touch-capable.
    pub fn descriptors(&self) -> Vec<HardwareControlDescriptor> {
        let mut by_id: BTreeMap<ControlId, HardwareControlDescriptor> = BTreeMap::new();

        let (focus, continuous): (Vec<&ControlMapping>, Vec<&ControlMapping>) = self
            .midi
            .values()
            .partition(|m| m.behavior == ControlBehavior::Focus);

        for mapping in continuous {
            let Some(control_id) = mapping.target.fixed() else {
                continue;
            };
            by_id.entry(control_id).or_insert(HardwareControlDescriptor {
                control_id,
                control_type: mapping.control_type(),
                supports_touch: false,
                supports_led_feedback: self.led_feedback.contains(&control_id),
            });
        }

        for mapping in focus {
            let Some(control_id) = mapping.target.fixed() else {
                continue;
            };
            by_id
                .entry(control_id)
                .or_insert(HardwareControlDescriptor {
                    control_id,
                    control_type: mapping.control_type(),
                    supports_touch: false,
                    supports_led_feedback: self.led_feedback.contains(&control_id),
                })
                .supports_touch = true;
        }

        by_id.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedbackMapping;
    use crate::types::HardwareControlType;

    fn mapping(control: MidiControl, target: MappingTarget) -> ControlMapping {
        ControlMapping {
            control,
            target,
            behavior: ControlBehavior::Continuous,
            encoder_mode: EncoderMode::Absolute,
            step: 0.01,
            hardware_type: None,
        }
    }

    fn test_config() -> SurfaceConfig {
        let mut encoder = mapping(MidiControl::cc(0, 17), MappingTarget::Focused);
        encoder.encoder_mode = EncoderMode::Relative;
        encoder.step = 0.02;

        let mut touch = mapping(MidiControl::note(0, 40), MappingTarget::Control(ControlId::GAIN));
        touch.behavior = ControlBehavior::Focus;

        let mut down = mapping(MidiControl::note(0, 41), MappingTarget::Control(ControlId::OUTPUT_GAIN));
        down.step = -0.05;

        SurfaceConfig {
            name: "test".to_string(),
            mappings: vec![
                mapping(MidiControl::cc(0, 16), MappingTarget::Control(ControlId::GAIN)),
                encoder,
                touch,
                down,
            ],
            feedback: vec![FeedbackMapping {
                control_id: ControlId::GAIN,
                led: Some(MidiControl::cc(0, 16)),
                focus: None,
            }],
            ..SurfaceConfig::default()
        }
    }

    #[test]
    fn test_absolute_cc() {
        let engine = MappingEngine::new(&test_config());
        let action = engine
            .map_midi(&MidiInputEvent::ControlChange {
                channel: 0,
                cc: 16,
                value: 127,
            })
            .unwrap();
        assert_eq!(
            action,
            SurfaceAction::Adjust {
                target: MappingTarget::Control(ControlId::GAIN),
                value: 1.0,
                relative: false
            }
        );
    }

    #[test]
    fn test_relative_encoder_scales_by_step() {
        let engine = MappingEngine::new(&test_config());
        let cw = engine
            .map_midi(&MidiInputEvent::ControlChange {
                channel: 0,
                cc: 17,
                value: 3,
            })
            .unwrap();
        let SurfaceAction::Adjust { value, relative, target } = cw else {
            panic!("expected adjust, got {:?}", cw);
        };
        assert!(relative);
        assert_eq!(target, MappingTarget::Focused);
        assert!((value - 0.06).abs() < 1e-6);

        let ccw = engine.map_midi(&MidiInputEvent::ControlChange {
            channel: 0,
            cc: 17,
            value: 127,
        });
        assert!(matches!(ccw, Some(SurfaceAction::Adjust { value, .. }) if value < 0.0));

        // No movement, no action
        assert_eq!(
            engine.map_midi(&MidiInputEvent::ControlChange {
                channel: 0,
                cc: 17,
                value: 64
            }),
            None
        );
    }

    #[test]
    fn test_touch_focuses_on_press_only() {
        let engine = MappingEngine::new(&test_config());
        let press = MidiInputEvent::NoteOn {
            channel: 0,
            note: 40,
            velocity: 127,
        };
        let release = MidiInputEvent::NoteOff {
            channel: 0,
            note: 40,
            velocity: 0,
        };
        assert_eq!(
            engine.map_midi(&press),
            Some(SurfaceAction::Focus(MappingTarget::Control(ControlId::GAIN)))
        );
        assert_eq!(engine.map_midi(&release), None);
    }

    #[test]
    fn test_step_button() {
        let engine = MappingEngine::new(&test_config());
        let action = engine.map_midi(&MidiInputEvent::NoteOn {
            channel: 0,
            note: 41,
            velocity: 100,
        });
        assert_eq!(
            action,
            Some(SurfaceAction::Adjust {
                target: MappingTarget::Control(ControlId::OUTPUT_GAIN),
                value: -0.05,
                relative: true
            })
        );
    }

    #[test]
    fn test_unmapped_midi_is_ignored() {
        let engine = MappingEngine::new(&test_config());
        assert_eq!(
            engine.map_midi(&MidiInputEvent::ControlChange {
                channel: 5,
                cc: 16,
                value: 10
            }),
            None
        );
    }

    #[test]
    fn test_default_keys() {
        let engine = MappingEngine::new(&SurfaceConfig::default());
        assert_eq!(
            engine.map_key('h'),
            Some(SurfaceAction::Adjust {
                target: MappingTarget::Control(ControlId::GAIN),
                value: 0.375,
                relative: false
            })
        );
        assert_eq!(engine.map_key('H'), engine.map_key('h'));
        assert!(matches!(
            engine.map_key(']'),
            Some(SurfaceAction::Adjust {
                target: MappingTarget::Focused,
                relative: true,
                ..
            })
        ));
        assert_eq!(engine.map_key('x'), None);
    }

    #[test]
    fn test_action_to_event() {
        let nudge = SurfaceAction::Adjust {
            target: MappingTarget::Focused,
            value: 0.05,
            relative: true,
        };
        assert_eq!(nudge.to_event(None), None);
        assert_eq!(
            nudge.to_event(Some(ControlId::OUTPUT_GAIN)),
            Some(HardwareControlEvent::relative(ControlId::OUTPUT_GAIN, 0.05))
        );

        let focus = SurfaceAction::Focus(MappingTarget::Control(ControlId::GAIN));
        assert_eq!(focus.to_event(Some(ControlId::GAIN)), None);
    }

    #[test]
    fn test_descriptors() {
        let engine = MappingEngine::new(&test_config());
        let descriptors = engine.descriptors();
        assert_eq!(descriptors.len(), 2);

        let gain = descriptors
            .iter()
            .find(|d| d.control_id == ControlId::GAIN)
            .unwrap();
        assert_eq!(gain.control_type, HardwareControlType::Fader);
        assert!(gain.supports_touch);
        assert!(gain.supports_led_feedback);

        let output = descriptors
            .iter()
            .find(|d| d.control_id == ControlId::OUTPUT_GAIN)
            .unwrap();
        assert_eq!(output.control_type, HardwareControlType::Button);
        assert!(!output.supports_touch);
        assert!(!output.supports_led_feedback);
    }
}
