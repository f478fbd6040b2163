//! Plugin instance
//!
//! [`GainPlugin`] lives for as long as the host keeps the plugin loaded. It
//! owns the one [`ParameterStore`]; editors come and go around it.

use crate::adapter::HardwareOutputAdapter;
use crate::config::SurfaceConfig;
use crate::view::EditorView;
use faderlink_core::{apply_gain, BlockParams, ParameterState, ParameterStore};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct GainPlugin {
    store: Arc<ParameterStore>,
}

impl GainPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &Arc<ParameterStore> {
        &self.store
    }

    /// Render one block in place
    pub fn process(&self, channels: &mut [&mut [f32]]) {
        let params = BlockParams::read(&self.store);
        apply_gain(&params, channels);
    }

    /// Persisted state for the host
    pub fn state_information(&self) -> Vec<u8> {
        match self.store.save_state() {
            Ok(yaml) => yaml.into_bytes(),
            Err(e) => {
                log::warn!("plugin: Failed to encode state: {}", e);
                Vec::new()
            }
        }
    }

    /// Restore state from the host; invalid data leaves the current values
    pub fn set_state_information(&self, data: &[u8]) {
        match ParameterState::from_bytes(data) {
            Ok(state) => {
                self.store.restore(&state);
                log::debug!("plugin: Restored state ({} bytes)", data.len());
            }
            Err(e) => log::warn!("plugin: Ignoring invalid state: {}", e),
        }
    }

    pub fn create_editor(
        &self,
        output: impl HardwareOutputAdapter + 'static,
        config: &SurfaceConfig,
    ) -> EditorView {
        EditorView::new(self.store.clone(), output, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::LogOutputAdapter;
    use faderlink_core::ControlId;

    #[test]
    fn test_process_applies_both_gains() {
        let plugin = GainPlugin::new();
        plugin.store().set_gain(1.5);
        plugin.store().set_output_gain(0.5);

        let mut left = [1.0f32, -0.5];
        let mut right = [0.25f32, 0.0];
        plugin.process(&mut [&mut left[..], &mut right[..]]);

        assert_eq!(left, [0.75, -0.375]);
        assert_eq!(right, [0.1875, 0.0]);
    }

    #[test]
    fn test_state_round_trip_between_instances() {
        let plugin = GainPlugin::new();
        plugin.store().set_gain(1.5);
        plugin.store().set_output_gain(0.2);
        plugin.store().set_focused_control_id(ControlId::OUTPUT_GAIN);
        plugin.store().set_editor_size(600, 700);

        let restored = GainPlugin::new();
        restored.set_state_information(&plugin.state_information());
        assert_eq!(restored.store().snapshot(), plugin.store().snapshot());
    }

    #[test]
    fn test_invalid_state_is_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let plugin = GainPlugin::new();
        plugin.store().set_gain(0.3);

        plugin.set_state_information(b"gain: [not a number");
        plugin.set_state_information(&[0xFF, 0xFE, 0x00]);
        assert_eq!(plugin.store().gain(), 0.3);
    }

    #[test]
    fn test_editor_state_survives_reopen() {
        let plugin = GainPlugin::new();
        let config = SurfaceConfig::default();

        let mut editor = plugin.create_editor(LogOutputAdapter, &config);
        assert!(editor.key_pressed('h'));
        editor.drag_started(ControlId::OUTPUT_GAIN);
        editor.resized(600, 700);
        drop(editor);

        let editor = plugin.create_editor(LogOutputAdapter, &config);
        assert_eq!(editor.slider_value(ControlId::GAIN), Some(0.75));
        assert_eq!(editor.focused_control(), Some(ControlId::OUTPUT_GAIN));
        assert_eq!(editor.size(), (600, 700));
    }
}
