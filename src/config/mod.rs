//! Configuration for cookie-size
//!
//! This module provides:
//! - `.cookie-size.toml` data structures
//! - Loading with defaults when the file is absent

pub mod file;
pub mod loader;

pub use file::{ConfigFile, SizeBudget, TargetsSetting, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
