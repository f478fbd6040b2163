//! Shared identifier types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for one logical control
///
/// Opaque integer, unique per control and stable across the process lifetime
/// and across state save/load. Serialized as a bare integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlId(pub u32);

impl ControlId {
    /// Input gain control
    pub const GAIN: ControlId = ControlId(1001);
    /// Output gain control
    pub const OUTPUT_GAIN: ControlId = ControlId(1002);
    /// Control that receives focus when nothing else has been recorded
    pub const FALLBACK_FOCUS: ControlId = Self::GAIN;

    /// Raw integer value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ControlId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_id_serializes_as_integer() {
        let yaml = serde_yaml::to_string(&ControlId(1002)).unwrap();
        assert_eq!(yaml.trim(), "1002");

        let id: ControlId = serde_yaml::from_str("1001").unwrap();
        assert_eq!(id, ControlId::GAIN);
    }

    #[test]
    fn test_fallback_focus_is_gain() {
        assert_eq!(ControlId::FALLBACK_FOCUS, ControlId::GAIN);
        assert_eq!(ControlId::from(7).get(), 7);
    }
}
