//! Run configuration: the explicit, immutable value every engine call
//! receives. Loadable from a JSON file and overridable per flag.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::engine::EngineConfig;
use crate::types::errors::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Naming template with `{PREFIX} {AREA} {NAME} {EXT} {PARENT_LETTER}`
    /// placeholders.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Prefix used when a file does not carry one.
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    /// Line-oriented `folder name:abbreviation` mapping text.
    #[serde(default)]
    pub area_map: String,
    #[serde(default = "default_true")]
    pub delete_temp: bool,
    #[serde(default = "default_true")]
    pub clean_names: bool,
    #[serde(default = "default_true")]
    pub apply_standard: bool,
    /// Persistent audit log file (applied runs only).
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    /// Folder name at which logged paths are relativized.
    #[serde(default)]
    pub log_anchor: Option<String>,
    /// First-level subfolder names to restrict the scan to.
    #[serde(default)]
    pub include: Vec<String>,
}

fn default_pattern() -> String {
    "{PARENT_LETTER}.{AREA}.{NAME}.{EXT}".to_string()
}
fn default_prefix() -> String {
    "P".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            default_prefix: default_prefix(),
            area_map: String::new(),
            delete_temp: true,
            clean_names: true,
            apply_standard: true,
            log_path: None,
            log_anchor: None,
            include: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// The slice of this configuration the engine consumes.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            default_prefix: self.default_prefix.clone(),
            delete_temp: self.delete_temp,
            clean_names: self.clean_names,
            apply_standard: self.apply_standard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.pattern, "{PARENT_LETTER}.{AREA}.{NAME}.{EXT}");
        assert_eq!(config.default_prefix, "P");
        assert!(config.delete_temp && config.clean_names && config.apply_standard);
        assert!(config.include.is_empty());
    }

    #[test]
    fn test_load_partial_json_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"default_prefix": "R", "area_map": "Tesoreria:TR", "delete_temp": false}}"#
        )
        .unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.default_prefix, "R");
        assert_eq!(config.area_map, "Tesoreria:TR");
        assert!(!config.delete_temp);
        assert_eq!(config.pattern, "{PARENT_LETTER}.{AREA}.{NAME}.{EXT}");
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"unknown_key": 1}}"#).unwrap();
        assert!(RunConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_engine_config_slice() {
        let config = RunConfig {
            default_prefix: "IND".to_string(),
            apply_standard: false,
            ..RunConfig::default()
        };
        let engine = config.engine_config();
        assert_eq!(engine.default_prefix, "IND");
        assert!(!engine.apply_standard);
        assert!(engine.delete_temp);
    }
}
