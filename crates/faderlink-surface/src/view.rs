//! Editor view: wires sliders, bindings, focus and hardware together
//!
//! The view is created when the host opens the editor and dropped when it
//! closes. Everything it builds (bindings, focus listeners) is torn down on
//! drop; all persistent state lives in the [`ParameterStore`].
//!
//! Update flow:
//!
//! ```text
//! slider drag ──► Slider::set_value(Send) ──► store ──► LED feedback
//!
//! key / MIDI ──► MappingEngine ──► HardwareControlEvent ──► BindingInputAdapter
//!                                                             │
//!                                         binding setter ◄────┘
//!                                           ├─► store
//!                                           └─► Slider::set_value(DontSend)
//! ```

use crate::adapter::{BindingInputAdapter, HardwareOutputAdapter};
use crate::binding::{ParameterBinding, Transform};
use crate::config::SurfaceConfig;
use crate::focus::{FocusListener, FocusManager, FocusState, Focusable};
use crate::mapping::{MappingEngine, SurfaceAction};
use crate::midi::MidiInputEvent;
use crate::registry::{BindingRegistry, SharedRegistry};
use crate::types::{HardwareControlDescriptor, HardwareControlEvent};
use faderlink_core::{ControlId, ParameterStore, GAIN_RANGE, OUTPUT_GAIN_RANGE};
use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::rc::Rc;
use std::sync::Arc;

/// Whether a value change should call the slider's change callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Send,
    DontSend,
}

/// On-screen slider model (native units)
pub struct Slider {
    control_id: ControlId,
    label: &'static str,
    range: RangeInclusive<f32>,
    value: f32,
    state: FocusState,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new(control_id: ControlId, label: &'static str, range: RangeInclusive<f32>, value: f32) -> Self {
        Self {
            control_id,
            label,
            range,
            value,
            state: FocusState::default(),
            on_change: None,
        }
    }

    pub fn control_id(&self) -> ControlId {
        self.control_id
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn range(&self) -> &RangeInclusive<f32> {
        &self.range
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Called with the new value on user-originated changes
    pub fn set_on_change(&mut self, callback: impl FnMut(f32) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Update the displayed value; unchanged values never notify
    pub fn set_value(&mut self, value: f32, notification: Notification) {
        if value == self.value {
            return;
        }
        self.value = value;
        if notification == Notification::Send {
            if let Some(callback) = self.on_change.as_mut() {
                callback(value);
            }
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.state.hovered = hovered;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.state.pressed = pressed;
    }
}

impl Focusable for Slider {
    fn set_focused(&mut self, focused: bool) {
        self.state.focused = focused;
    }
}

type SharedSlider = Rc<RefCell<Slider>>;

pub struct EditorView {
    store: Arc<ParameterStore>,
    registry: SharedRegistry,
    input: BindingInputAdapter,
    output: Box<dyn HardwareOutputAdapter>,
    focus: FocusManager,
    mapping: MappingEngine,
    sliders: Vec<SharedSlider>,
    listeners: Vec<(ControlId, FocusListener)>,
}

impl EditorView {
    pub fn new(
        store: Arc<ParameterStore>,
        output: impl HardwareOutputAdapter + 'static,
        config: &SurfaceConfig,
    ) -> Self {
        let registry = BindingRegistry::shared();

        let gain = Self::build_control(
            &store,
            &registry,
            ControlId::GAIN,
            "Gain",
            GAIN_RANGE,
            ParameterStore::gain,
            ParameterStore::set_gain,
        );
        let output_gain = Self::build_control(
            &store,
            &registry,
            ControlId::OUTPUT_GAIN,
            "Output",
            OUTPUT_GAIN_RANGE,
            ParameterStore::output_gain,
            ParameterStore::set_output_gain,
        );

        let mut view = Self {
            input: BindingInputAdapter::new(registry.clone()),
            output: Box::new(output),
            focus: FocusManager::new(),
            mapping: MappingEngine::new(config),
            sliders: vec![gain, output_gain],
            listeners: Vec::new(),
            registry,
            store,
        };

        for slider in &view.sliders {
            let id = slider.borrow().control_id();
            let listener: FocusListener = slider.clone();
            view.focus.register_widget(id, &listener);
            view.listeners.push((id, listener));
        }

        let restored = view.store.focused_control_id();
        let initial = if view.registry.borrow().contains(restored) {
            restored
        } else {
            log::debug!("view: Stored focus {} has no control, using fallback", restored);
            ControlId::FALLBACK_FOCUS
        };
        view.focus_control(initial);

        for id in view.control_ids() {
            view.push_led(id);
        }

        log::debug!(
            "view: Opened editor {}x{} with '{}'",
            view.store.editor_width(),
            view.store.editor_height(),
            config.name
        );
        view
    }

    /// Slider plus the binding that keeps it and the store in sync
    fn build_control(
        store: &Arc<ParameterStore>,
        registry: &SharedRegistry,
        control_id: ControlId,
        label: &'static str,
        range: RangeInclusive<f32>,
        get: fn(&ParameterStore) -> f32,
        set: fn(&ParameterStore, f32),
    ) -> SharedSlider {
        let slider = Rc::new(RefCell::new(Slider::new(control_id, label, range.clone(), get(store))));

        let drag_store = store.clone();
        slider
            .borrow_mut()
            .set_on_change(move |value| set(&drag_store, value));

        let get_store = store.clone();
        let set_store = store.clone();
        let set_slider = slider.clone();
        registry.borrow_mut().add(ParameterBinding::mapped(
            control_id,
            move || get(&get_store),
            move |native| {
                set(&set_store, native);
                set_slider
                    .borrow_mut()
                    .set_value(get(&set_store), Notification::DontSend);
            },
            Transform::linear(range),
        ));

        slider
    }

    fn control_ids(&self) -> Vec<ControlId> {
        self.sliders.iter().map(|s| s.borrow().control_id()).collect()
    }

    fn slider(&self, control_id: ControlId) -> Option<&SharedSlider> {
        self.sliders
            .iter()
            .find(|s| s.borrow().control_id() == control_id)
    }

    pub fn slider_value(&self, control_id: ControlId) -> Option<f32> {
        self.slider(control_id).map(|s| s.borrow().value())
    }

    pub fn slider_state(&self, control_id: ControlId) -> Option<FocusState> {
        self.slider(control_id).map(|s| s.borrow().state())
    }

    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    pub fn focused_control(&self) -> Option<ControlId> {
        self.focus.focused_control()
    }

    /// Current editor size, as persisted
    pub fn size(&self) -> (u32, u32) {
        self.store.editor_size()
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        self.store.set_editor_size(width, height);
    }

    pub fn descriptors(&self) -> Vec<HardwareControlDescriptor> {
        self.mapping.descriptors()
    }

    /// User dragged a slider to `value` (native units)
    pub fn slider_changed(&mut self, control_id: ControlId, value: f32) {
        let Some(slider) = self.slider(control_id).cloned() else {
            return;
        };
        slider.borrow_mut().set_value(value, Notification::Send);
        // Show what the store accepted after clamping
        if let Some(stored) = self.store_value(control_id) {
            slider.borrow_mut().set_value(stored, Notification::DontSend);
        }
        self.push_led(control_id);
    }

    pub fn drag_started(&mut self, control_id: ControlId) {
        if let Some(slider) = self.slider(control_id).cloned() {
            slider.borrow_mut().set_pressed(true);
            self.focus_control(control_id);
        }
    }

    pub fn drag_ended(&mut self, control_id: ControlId) {
        if let Some(slider) = self.slider(control_id) {
            slider.borrow_mut().set_pressed(false);
        }
    }

    pub fn hover_changed(&mut self, control_id: ControlId, hovered: bool) {
        if let Some(slider) = self.slider(control_id) {
            slider.borrow_mut().set_hovered(hovered);
        }
    }

    /// Move focus to `control_id`
    ///
    /// Clears the old hardware indicator before any listener hears about the
    /// change, asserts the new one after, then records the choice.
    pub fn focus_control(&mut self, control_id: ControlId) {
        if let Some(old) = self.focus.focused_control() {
            self.output.set_focus(old, false);
        }
        self.focus.set_focused_control(Some(control_id));
        self.output.set_focus(control_id, true);
        self.store.set_focused_control_id(control_id);
    }

    /// Handle a computer-keyboard key; returns whether it was mapped
    pub fn key_pressed(&mut self, key: char) -> bool {
        match self.mapping.map_key(key) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Handle one raw MIDI message; returns whether it changed anything
    pub fn handle_midi(&mut self, data: &[u8]) -> bool {
        let Some(event) = MidiInputEvent::parse(data) else {
            log::trace!("view: Ignoring MIDI {:02X?}", data);
            return false;
        };
        match self.mapping.map_midi(&event) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Apply an already translated hardware event
    pub fn process_event(&mut self, event: &HardwareControlEvent) -> bool {
        if !self.input.route(event) {
            return false;
        }
        self.push_led(event.control_id);
        true
    }

    fn apply(&mut self, action: SurfaceAction) -> bool {
        let focused = self.focus.focused_control();
        match action {
            SurfaceAction::Focus(target) => match target.resolve(focused) {
                Some(id) if self.registry.borrow().contains(id) => {
                    self.focus_control(id);
                    true
                }
                _ => false,
            },
            SurfaceAction::Adjust { .. } => match action.to_event(focused) {
                Some(event) => self.process_event(&event),
                None => false,
            },
        }
    }

    /// Bring sliders and LEDs in line with the store (after a host state load)
    pub fn refresh(&mut self) {
        for slider in &self.sliders {
            let mut slider = slider.borrow_mut();
            if let Some(value) = self.store_value(slider.control_id()) {
                slider.set_value(value, Notification::DontSend);
            }
        }
        for id in self.control_ids() {
            self.push_led(id);
        }
    }

    fn store_value(&self, control_id: ControlId) -> Option<f32> {
        match control_id {
            ControlId::GAIN => Some(self.store.gain()),
            ControlId::OUTPUT_GAIN => Some(self.store.output_gain()),
            _ => None,
        }
    }

    fn push_led(&mut self, control_id: ControlId) {
        let value = match self.registry.borrow().find(control_id) {
            Some(binding) => binding.get(),
            None => return,
        };
        self.output.set_led_value(control_id, value);
    }
}

impl Drop for EditorView {
    fn drop(&mut self) {
        for (id, listener) in self.listeners.drain(..) {
            self.focus.unregister_widget(id, &listener);
        }
        self.registry.borrow_mut().clear();
        log::debug!("view: Closed editor");
    }
}
