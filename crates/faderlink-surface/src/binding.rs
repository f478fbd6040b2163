//! Normalized accessors over native parameter values
//!
//! A [`ParameterBinding`] is how every input source (widget, encoder, key)
//! talks to a parameter: it only ever sees a normalized `0.0..=1.0` position.
//! The binding owns a native getter/setter pair and, for parameters whose
//! native range differs from the unit interval, a [`Transform`].
//!
//! ```text
//! set(n) ──► to_native(n) ──► setter(native) ──► ParameterStore (clamps)
//! get()  ◄── to_normalized(native) ◄── getter()
//! ```
//!
//! Bindings never clamp. Out-of-range positions are passed through and the
//! store's setter is the only place a range is enforced.

use faderlink_core::ControlId;
use std::fmt;
use std::ops::RangeInclusive;

type MapFn = Box<dyn Fn(f32) -> f32>;

/// Largest `|to_normalized(to_native(x)) - x|` tolerated before warning
pub const ROUND_TRIP_TOLERANCE: f32 = 1e-3;

/// Number of evenly spaced points checked across the unit interval
const ROUND_TRIP_SAMPLES: u32 = 10;

/// Pair of functions converting between normalized and native values
///
/// The two directions are supplied independently. Keeping them inverse of
/// each other is the caller's job; [`Transform::max_round_trip_error`]
/// measures how far off they are.
pub struct Transform {
    to_native: MapFn,
    to_normalized: MapFn,
}

impl Transform {
    pub fn new(
        to_native: impl Fn(f32) -> f32 + 'static,
        to_normalized: impl Fn(f32) -> f32 + 'static,
    ) -> Self {
        Self {
            to_native: Box::new(to_native),
            to_normalized: Box::new(to_normalized),
        }
    }

    /// Affine mapping of the unit interval onto `range`
    ///
    /// A zero-width range maps every native value to 0.5.
    pub fn linear(range: RangeInclusive<f32>) -> Self {
        let min = *range.start();
        let span = *range.end() - min;
        Self::new(
            move |normalized| min + normalized * span,
            move |native| {
                if span.abs() < f32::EPSILON {
                    0.5
                } else {
                    (native - min) / span
                }
            },
        )
    }

    pub fn to_native(&self, normalized: f32) -> f32 {
        (self.to_native)(normalized)
    }

    pub fn to_normalized(&self, native: f32) -> f32 {
        (self.to_normalized)(native)
    }

    /// Worst round-trip error over evenly spaced points in `0.0..=1.0`
    ///
    /// NaN results count as infinite error.
    pub fn max_round_trip_error(&self) -> f32 {
        (0..=ROUND_TRIP_SAMPLES)
            .map(|i| i as f32 / ROUND_TRIP_SAMPLES as f32)
            .map(|x| {
                let err = (self.to_normalized(self.to_native(x)) - x).abs();
                if err.is_nan() {
                    f32::INFINITY
                } else {
                    err
                }
            })
            .fold(0.0, f32::max)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("to_native(0)", &self.to_native(0.0))
            .field("to_native(1)", &self.to_native(1.0))
            .finish()
    }
}

/// One control's normalized view of a parameter
pub struct ParameterBinding {
    control_id: ControlId,
    getter: Box<dyn Fn() -> f32>,
    setter: Box<dyn Fn(f32)>,
    transform: Option<Transform>,
}

impl ParameterBinding {
    /// Binding whose native domain already is the normalized domain
    pub fn direct(
        control_id: ControlId,
        getter: impl Fn() -> f32 + 'static,
        setter: impl Fn(f32) + 'static,
    ) -> Self {
        Self {
            control_id,
            getter: Box::new(getter),
            setter: Box::new(setter),
            transform: None,
        }
    }

    /// Binding that converts through `transform`
    ///
    /// Logs a warning when the transform's two directions disagree by more
    /// than [`ROUND_TRIP_TOLERANCE`]; the binding is still created.
    pub fn mapped(
        control_id: ControlId,
        getter: impl Fn() -> f32 + 'static,
        setter: impl Fn(f32) + 'static,
        transform: Transform,
    ) -> Self {
        let err = transform.max_round_trip_error();
        if err > ROUND_TRIP_TOLERANCE {
            log::warn!(
                "binding {}: transform is not its own inverse (round-trip error {})",
                control_id,
                err
            );
        }
        Self {
            control_id,
            getter: Box::new(getter),
            setter: Box::new(setter),
            transform: Some(transform),
        }
    }

    pub fn control_id(&self) -> ControlId {
        self.control_id
    }

    pub fn is_mapped(&self) -> bool {
        self.transform.is_some()
    }

    /// Current normalized position
    pub fn get(&self) -> f32 {
        let native = (self.getter)();
        match &self.transform {
            Some(transform) => transform.to_normalized(native),
            None => native,
        }
    }

    /// Write a normalized position through to the native setter
    pub fn set(&self, normalized: f32) {
        let native = match &self.transform {
            Some(transform) => transform.to_native(normalized),
            None => normalized,
        };
        (self.setter)(native);
    }
}

impl fmt::Debug for ParameterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterBinding")
            .field("control_id", &self.control_id)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}
