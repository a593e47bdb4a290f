//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use stackmap::{StackmapError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for StackmapError {
    fn from(err: ConfigError) -> Self {
        StackmapError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (stackmap/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, StackmapError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("stackmap/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "stackmap", "stackmap") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(
                path = system_config.display().to_string();
                "Loading configuration from system path"
            );
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, StackmapError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use stackmap::config::{DuplicateIdPolicy, PlacementKind};

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let file = config_file(
            r##"
            [layout]
            node_width = 200.0
            grid_columns = 3
            placement = "grid"
            duplicate_ids = "reject"

            [layout.curve]
            lift = 30.0
            seed = 9

            [style]
            background_color = "#fafafa"

            [style.theme.category_colors]
            database = "#000000"
            "##,
        );

        let config = load_config(Some(file.path())).unwrap();
        let layout = config.layout();
        assert_eq!(layout.node_size().width(), 200.0);
        assert_eq!(layout.node_size().height(), 90.0);
        assert_eq!(layout.grid_columns(), 3);
        assert_eq!(layout.placement(), PlacementKind::Grid);
        assert_eq!(layout.duplicate_ids(), DuplicateIdPolicy::Reject);
        assert_eq!(layout.curve().lift(), 30.0);
        assert_eq!(layout.curve().jitter(), 100.0);
        assert_eq!(layout.curve().seed(), Some(9));
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = load_config(Some("definitely/not/here.toml"));
        assert!(matches!(result, Err(StackmapError::Config(msg)) if msg.contains("Missing")));
    }

    #[test]
    fn test_invalid_toml() {
        let file = config_file("[layout\nnode_width = ");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(StackmapError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let file = config_file("[layout]\ngrid_columns = 0\n");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(StackmapError::Config(_))
        ));
    }
}
