//! Parsing and validation of `globguard.toml` project configuration files.
//!
//! This crate reads the project configuration file into a strongly-typed
//! [`ProjectConfig`] and turns its `[[glob]]` declarations into glob requests
//! that carry the call site they were declared at.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, LoadedConfig, CONFIG_FILE};
pub use resolve::{resolve_globs, DeclaredGlob};
pub use types::*;
