//! Standard config locations

use std::path::PathBuf;

/// Per-user faderlink config directory
///
/// Returns `<platform config dir>/faderlink`, or `./faderlink` when the
/// platform has no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("faderlink")
}

/// Path of a named file inside [`default_config_dir`]
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_layout() {
        let path = default_config_path("surface.yaml");
        assert!(path.ends_with("faderlink/surface.yaml"));
    }
}
