//! faderlink surface - binds on-screen and hardware controls to parameters
//!
//! Everything here runs on the UI thread (`Rc`/`RefCell`, not `Send`).
//! The audio side only ever sees the [`faderlink_core::ParameterStore`].
//!
//! ## Layers
//!
//! - **binding / registry**: normalized `0..1` view of each parameter,
//!   looked up by [`ControlId`](faderlink_core::ControlId)
//! - **focus**: which control currently has focus, with listener fan-out
//! - **adapter**: protocol-agnostic hardware events in, LED/focus feedback out
//! - **midi / normalize / mapping / config**: raw MIDI and keyboard input
//!   translated into hardware events via a YAML surface mapping
//! - **feedback**: MIDI encoding of LED and focus feedback
//! - **view / plugin**: the editor that wires it together, and the plugin
//!   instance that owns the store across editor lifetimes

pub mod adapter;
pub mod binding;
pub mod config;
pub mod feedback;
pub mod focus;
pub mod mapping;
pub mod midi;
pub mod normalize;
pub mod plugin;
pub mod registry;
pub mod types;
pub mod view;

pub use adapter::{BindingInputAdapter, HardwareInputAdapter, HardwareOutputAdapter, LogOutputAdapter};
pub use binding::{ParameterBinding, Transform};
pub use config::{
    default_surface_config_path, load_surface_config, save_surface_config, ControlBehavior,
    EncoderMode, MappingTarget, SurfaceConfig,
};
pub use feedback::{FeedbackChangeTracker, MidiFeedbackOutput};
pub use focus::{FocusListener, FocusManager, FocusState, Focusable};
pub use mapping::{MappingEngine, SurfaceAction};
pub use midi::{MidiControl, MidiInputEvent};
pub use plugin::GainPlugin;
pub use registry::{BindingRegistry, SharedRegistry};
pub use types::{HardwareControlDescriptor, HardwareControlEvent, HardwareControlType};
pub use view::{EditorView, Notification, Slider};
