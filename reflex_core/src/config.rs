//! Configuration file support for REFLEX
//!
//! Any `Deserialize` type can be loaded from TOML or YAML; the format is
//! auto-detected from the file extension. Also provides the standard search
//! paths used when no explicit file is given.
use crate::error::{ReflexError, ReflexResult};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Load a config file (auto-detect format)
pub fn load_config<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> ReflexResult<T> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ReflexError::config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Auto-detect format based on extension
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("toml") => from_toml_str(&contents),
        Some("yaml") | Some("yml") => from_yaml_str(&contents),
        _ => {
            // Try both formats
            from_toml_str(&contents).or_else(|_| from_yaml_str(&contents))
        }
    }
}

/// Parse config from TOML string
pub fn from_toml_str<T: DeserializeOwned>(contents: &str) -> ReflexResult<T> {
    toml::from_str(contents)
        .map_err(|e| ReflexError::config(format!("Failed to parse TOML: {}", e)))
}

/// Parse config from YAML string
pub fn from_yaml_str<T: DeserializeOwned>(contents: &str) -> ReflexResult<T> {
    serde_yaml::from_str(contents)
        .map_err(|e| ReflexError::config(format!("Failed to parse YAML: {}", e)))
}

/// First existing file among [`get_search_paths`], if any
///
/// Search order:
/// 1. ./reflex.toml, ./reflex.yaml or ./reflex.yml
/// 2. ~/.reflex/config.toml, config.yaml or config.yml
/// 3. /etc/reflex/config.toml or /etc/reflex/config.yaml
pub fn find_config_file() -> Option<PathBuf> {
    get_search_paths().into_iter().find(|path| path.exists())
}

/// Get standard config file search paths
pub fn get_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("reflex.toml"),
        PathBuf::from("reflex.yaml"),
        PathBuf::from("reflex.yml"),
    ];

    if let Some(home) = dirs::home_dir() {
        let reflex_dir = home.join(".reflex");
        paths.push(reflex_dir.join("config.toml"));
        paths.push(reflex_dir.join("config.yaml"));
        paths.push(reflex_dir.join("config.yml"));
    }

    paths.push(PathBuf::from("/etc/reflex/config.toml"));
    paths.push(PathBuf::from("/etc/reflex/config.yaml"));

    paths
}
