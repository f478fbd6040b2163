//! Real-time read path
//!
//! The render callback reads the store once per block through [`BlockParams`]
//! and never touches bindings, focus or any UI-side type. Everything here is
//! allocation-free and lock-free.

use crate::params::ParameterStore;

/// Parameter values sampled at the start of one processing block
///
/// Fields are loaded one at a time, so a block may combine values from two
/// different UI updates. Gain stages tolerate that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockParams {
    pub gain: f32,
    pub output_gain: f32,
}

impl BlockParams {
    pub fn read(store: &ParameterStore) -> Self {
        Self {
            gain: store.gain(),
            output_gain: store.output_gain(),
        }
    }

    /// Combined linear gain applied to each sample
    pub fn total_gain(&self) -> f32 {
        self.gain * self.output_gain
    }
}

/// Scale every channel by the block's combined gain
///
/// Unity gain leaves the buffers untouched.
pub fn apply_gain(params: &BlockParams, channels: &mut [&mut [f32]]) {
    let gain = params.total_gain();
    if gain == 1.0 {
        return;
    }
    for channel in channels.iter_mut() {
        for sample in channel.iter_mut() {
            *sample *= gain;
        }
    }
}
