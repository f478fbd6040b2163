//! YAML configuration helpers
//!
//! Shared by every crate that keeps user-editable settings on disk (currently
//! the control-surface mapping in `faderlink-surface`).

mod io;
mod paths;

pub use io::{load_config, read_config, save_config};
pub use paths::{default_config_dir, default_config_path};
