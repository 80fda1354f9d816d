//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use globguard_source::{FileId, SourceDb};
use std::path::{Path, PathBuf};

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "globguard.toml";

/// A parsed configuration together with where its text lives.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Path the configuration was read from.
    pub path: PathBuf,
    /// The configuration file registered in the source database.
    pub file: FileId,
    /// The parsed configuration.
    pub config: ProjectConfig,
}

/// Loads and validates `<project_dir>/globguard.toml`.
///
/// The file text is registered in `db` so declarations can be mapped back to
/// lines.
pub fn load_config(project_dir: &Path, db: &mut SourceDb) -> Result<LoadedConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE), db)
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path, db: &mut SourceDb) -> Result<LoadedConfig, ConfigError> {
    let file = db.load_file(path)?;
    let config = load_config_from_str(&db.get_file(file).content)?;
    Ok(LoadedConfig {
        path: path.to_path_buf(),
        file,
        config,
    })
}

/// Parses and validates a `globguard.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and glob options are consistent.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.output_dir.is_empty() {
        return Err(ConfigError::MissingField("project.output_dir".to_string()));
    }
    for (idx, decl) in config.globs.iter().enumerate() {
        if decl.variable().is_empty() {
            return Err(ConfigError::MissingField(format!("glob[{idx}].variable")));
        }
        if decl.expression.is_empty() {
            return Err(ConfigError::MissingField(format!("glob[{idx}].expression")));
        }
        if decl.follow_symlinks && !decl.recurse {
            return Err(ConfigError::ValidationError(format!(
                "glob '{}': follow_symlinks requires recurse",
                decl.variable()
            )));
        }
    }
    Ok(())
}
