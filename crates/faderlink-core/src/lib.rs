//! faderlink core - parameter storage shared by the UI and the audio thread
//!
//! This crate owns everything both scheduling domains touch:
//!
//! - [`ParameterStore`]: the authoritative, lock-free parameter values and the
//!   single clamp boundary for every field
//! - [`ParameterState`]: the persisted key/value snapshot of the store
//! - [`BlockParams`]: the once-per-block read used by the render callback
//! - YAML config I/O helpers shared with the surface crate
//!
//! Nothing in here knows about widgets, bindings or hardware. Those live in
//! `faderlink-surface` and only ever hold an `Arc<ParameterStore>`.

pub mod config;
pub mod params;
pub mod render;
pub mod state;
pub mod types;

pub use params::{
    ParameterStore, EDITOR_SIZE_RANGE, GAIN_RANGE, OUTPUT_GAIN_RANGE,
};
pub use render::{apply_gain, BlockParams};
pub use state::{ParameterState, StateError};
pub use types::ControlId;
