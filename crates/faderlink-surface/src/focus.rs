//! Single-focus tracking for controls
//!
//! Exactly zero or one control is focused at a time. Whoever cares about focus
//! (widget highlight, hardware focus LED) registers a [`Focusable`] listener
//! for its control id.
//!
//! # Transition
//!
//! ```text
//! set_focused_control(new)
//!   1. old focused id has a live listener  -> set_focused(false)
//!   2. focused = new
//!   3. new id has a live listener          -> set_focused(true)
//! ```
//!
//! Re-focusing the already focused control runs both steps again.
//!
//! # Listener lifetime
//!
//! The manager does not own listeners. It keeps a `Weak` reference, so callers
//! should unregister before dropping a listener; one that is dropped anyway is
//! skipped on the next transition instead of being called.

use faderlink_core::ControlId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Receiver of focus-changed notifications
pub trait Focusable {
    fn set_focused(&mut self, focused: bool);
}

/// Shared handle used to register a listener
pub type FocusListener = Rc<RefCell<dyn Focusable>>;

/// Interaction state a widget tracks for drawing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    pub focused: bool,
    pub hovered: bool,
    pub pressed: bool,
}

#[derive(Default)]
pub struct FocusManager {
    focused: Option<ControlId>,
    widgets: HashMap<ControlId, Weak<RefCell<dyn Focusable>>>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move focus to `control_id` (or clear it with `None`)
    pub fn set_focused_control(&mut self, control_id: Option<ControlId>) {
        if let Some(old) = self.focused {
            self.notify(old, false);
        }

        self.focused = control_id;

        if let Some(new) = self.focused {
            self.notify(new, true);
        }
    }

    pub fn focused_control(&self) -> Option<ControlId> {
        self.focused
    }

    /// Associate a listener with a control, replacing any previous one
    pub fn register_widget(&mut self, control_id: ControlId, listener: &FocusListener) {
        self.widgets.insert(control_id, Rc::downgrade(listener));
    }

    /// Remove the association, but only if `listener` is the one registered
    ///
    /// A stale unregister (from a listener that has since been replaced) is a
    /// no-op, so it cannot clobber the newer registration.
    pub fn unregister_widget(&mut self, control_id: ControlId, listener: &FocusListener) {
        let matches = self
            .widgets
            .get(&control_id)
            .is_some_and(|registered| Weak::ptr_eq(registered, &Rc::downgrade(listener)));

        if matches {
            self.widgets.remove(&control_id);
        } else {
            log::trace!("focus: Ignoring stale unregister for control {}", control_id);
        }
    }

    /// Whether a listener is registered and still alive for `control_id`
    pub fn has_listener(&self, control_id: ControlId) -> bool {
        self.widgets
            .get(&control_id)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    fn notify(&self, control_id: ControlId, focused: bool) {
        let Some(weak) = self.widgets.get(&control_id) else {
            return;
        };
        let Some(listener) = weak.upgrade() else {
            log::trace!("focus: Listener for control {} was dropped", control_id);
            return;
        };
        match listener.try_borrow_mut() {
            Ok(mut listener) => listener.set_focused(focused),
            Err(_) => log::warn!(
                "focus: Listener for control {} is busy, skipping set_focused({})",
                control_id,
                focused
            ),
        };
    }
}

impl std::fmt::Debug for FocusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusManager")
            .field("focused", &self.focused)
            .field("widgets", &self.widgets.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Appends `(name, focused)` to a shared log on every notification
    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<(&'static str, bool)>>>,
    }

    impl Focusable for Recorder {
        fn set_focused(&mut self, focused: bool) {
            self.log.borrow_mut().push((self.name, focused));
        }
    }

    fn recorder(
        name: &'static str,
        log: &Rc<RefCell<Vec<(&'static str, bool)>>>,
    ) -> FocusListener {
        Rc::new(RefCell::new(Recorder {
            name,
            log: log.clone(),
        }))
    }

    const A: ControlId = ControlId(1);
    const B: ControlId = ControlId(2);

    #[test]
    fn test_switch_focus_clears_old_then_sets_new() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let b = recorder("b", &log);

        let mut focus = FocusManager::new();
        focus.register_widget(A, &a);
        focus.register_widget(B, &b);

        focus.set_focused_control(Some(A));
        log.borrow_mut().clear();

        focus.set_focused_control(Some(B));
        assert_eq!(*log.borrow(), [("a", false), ("b", true)]);
        assert_eq!(focus.focused_control(), Some(B));
    }

    #[test]
    fn test_refocus_same_control_notifies_again() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let mut focus = FocusManager::new();
        focus.register_widget(A, &a);

        focus.set_focused_control(Some(A));
        focus.set_focused_control(Some(A));
        assert_eq!(*log.borrow(), [("a", true), ("a", false), ("a", true)]);
    }

    #[test]
    fn test_clear_focus() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let mut focus = FocusManager::new();
        focus.register_widget(A, &a);

        focus.set_focused_control(Some(A));
        focus.set_focused_control(None);
        assert_eq!(*log.borrow(), [("a", true), ("a", false)]);
        assert_eq!(focus.focused_control(), None);
    }

    #[test]
    fn test_focus_without_listener_is_tracked() {
        let mut focus = FocusManager::new();
        focus.set_focused_control(Some(ControlId(77)));
        assert_eq!(focus.focused_control(), Some(ControlId(77)));
    }

    #[test]
    fn test_stale_unregister_is_ignored() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stale = recorder("stale", &log);
        let current = recorder("current", &log);

        let mut focus = FocusManager::new();
        focus.register_widget(A, &stale);
        focus.register_widget(A, &current);
        focus.unregister_widget(A, &stale);
        assert!(focus.has_listener(A));

        focus.set_focused_control(Some(A));
        assert_eq!(*log.borrow(), [("current", true)]);
    }

    #[test]
    fn test_matching_unregister_removes_listener() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let mut focus = FocusManager::new();
        focus.register_widget(A, &a);
        focus.unregister_widget(A, &a);

        focus.set_focused_control(Some(A));
        assert!(log.borrow().is_empty());
        assert!(!focus.has_listener(A));
    }

    #[test]
    fn test_dropped_listener_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut focus = FocusManager::new();
        {
            let a = recorder("a", &log);
            focus.register_widget(A, &a);
        }
        assert!(!focus.has_listener(A));

        focus.set_focused_control(Some(A));
        focus.set_focused_control(Some(B));
        assert!(log.borrow().is_empty());
    }
}
