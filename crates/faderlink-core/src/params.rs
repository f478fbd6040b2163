//! Authoritative parameter storage
//!
//! [`ParameterStore`] is shared between the real-time render callback and the
//! UI/event path via `Arc<ParameterStore>`. Every field is an independent
//! atomic, so each get/set is lock-free, allocation-free and never blocks.
//!
//! # Clamp boundary
//!
//! Each setter clamps its input to that field's range, and nothing else in the
//! workspace clamps parameter values. UI widgets, hardware encoders, keyboard
//! shortcuts and state restore all land here, so the ranges below are the only
//! source of truth.
//!
//! # Consistency
//!
//! There is no cross-field transaction. A reader that loads `gain` and then
//! `output_gain` may observe values from two unrelated updates.

use crate::state::ParameterState;
use crate::types::ControlId;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU32, Ordering};

/// Valid input gain range (linear)
pub const GAIN_RANGE: RangeInclusive<f32> = 0.0..=2.0;
/// Valid output gain range (linear)
pub const OUTPUT_GAIN_RANGE: RangeInclusive<f32> = 0.0..=2.0;
/// Valid editor width/height range in pixels
pub const EDITOR_SIZE_RANGE: RangeInclusive<u32> = 360..=900;

pub const DEFAULT_GAIN: f32 = 1.0;
pub const DEFAULT_OUTPUT_GAIN: f32 = 1.0;
pub const DEFAULT_EDITOR_WIDTH: u32 = 420;
pub const DEFAULT_EDITOR_HEIGHT: u32 = 520;

/// `f32` stored as its bit pattern in an `AtomicU32`
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Clamp a float into `range`; NaN maps to the lower bound
fn clamp_f32(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

/// Plugin parameter values, owned by the plugin instance
///
/// Created once per plugin instance and handed to views and bindings as an
/// `Arc`. Outlives any editor, so values survive the UI being closed and
/// reopened.
#[derive(Debug)]
pub struct ParameterStore {
    gain: AtomicF32,
    output_gain: AtomicF32,
    focused_control_id: AtomicU32,
    editor_width: AtomicU32,
    editor_height: AtomicU32,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    /// Create a store with every field at its default
    pub fn new() -> Self {
        Self {
            gain: AtomicF32::new(DEFAULT_GAIN),
            output_gain: AtomicF32::new(DEFAULT_OUTPUT_GAIN),
            focused_control_id: AtomicU32::new(ControlId::FALLBACK_FOCUS.get()),
            editor_width: AtomicU32::new(DEFAULT_EDITOR_WIDTH),
            editor_height: AtomicU32::new(DEFAULT_EDITOR_HEIGHT),
        }
    }

    /// Input gain (linear, 0.0-2.0)
    pub fn gain(&self) -> f32 {
        self.gain.load()
    }

    /// Set input gain, clamped to [`GAIN_RANGE`]
    pub fn set_gain(&self, gain: f32) {
        self.gain.store(clamp_f32(gain, &GAIN_RANGE));
    }

    /// Output gain (linear, 0.0-2.0)
    pub fn output_gain(&self) -> f32 {
        self.output_gain.load()
    }

    /// Set output gain, clamped to [`OUTPUT_GAIN_RANGE`]
    pub fn set_output_gain(&self, gain: f32) {
        self.output_gain.store(clamp_f32(gain, &OUTPUT_GAIN_RANGE));
    }

    /// Control that had focus when the editor was last used
    pub fn focused_control_id(&self) -> ControlId {
        ControlId(self.focused_control_id.load(Ordering::Relaxed))
    }

    /// Record the focused control (any id is accepted)
    pub fn set_focused_control_id(&self, id: ControlId) {
        self.focused_control_id.store(id.get(), Ordering::Relaxed);
    }

    pub fn editor_width(&self) -> u32 {
        self.editor_width.load(Ordering::Relaxed)
    }

    pub fn editor_height(&self) -> u32 {
        self.editor_height.load(Ordering::Relaxed)
    }

    /// Editor size as `(width, height)`
    ///
    /// Two separate loads; a concurrent resize can produce a mixed pair.
    pub fn editor_size(&self) -> (u32, u32) {
        (self.editor_width(), self.editor_height())
    }

    /// Store a new editor size, each dimension clamped to [`EDITOR_SIZE_RANGE`]
    pub fn set_editor_size(&self, width: u32, height: u32) {
        let (min, max) = (*EDITOR_SIZE_RANGE.start(), *EDITOR_SIZE_RANGE.end());
        self.editor_width.store(width.clamp(min, max), Ordering::Relaxed);
        self.editor_height.store(height.clamp(min, max), Ordering::Relaxed);
    }

    /// Project every field into a snapshot
    pub fn snapshot(&self) -> ParameterState {
        ParameterState {
            gain: self.gain(),
            output_gain: self.output_gain(),
            focused_control_id: self.focused_control_id(),
            editor_width: self.editor_width(),
            editor_height: self.editor_height(),
        }
    }

    /// Apply a snapshot, routing every value through its setter
    pub fn restore(&self, state: &ParameterState) {
        self.set_gain(state.gain);
        self.set_output_gain(state.output_gain);
        self.set_focused_control_id(state.focused_control_id);
        self.set_editor_size(state.editor_width, state.editor_height);
    }
}
