//! Overlay configuration persistence
//!
//! Stores preferences in `~/.config/highlight-overlay/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HighlightError;
use crate::overlay::OverlapPolicy;

/// Output format of the `overlay` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// How overlapping ranges within one layer are handled
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
    /// Validate same-layer overlaps in release builds too
    #[serde(default = "default_validate")]
    pub validate_in_release: bool,
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_validate() -> bool {
    true
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            overlap_policy: OverlapPolicy::default(),
            validate_in_release: default_validate(),
            output: OutputFormat::default(),
        }
    }
}

impl OverlayConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), HighlightError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HighlightError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| HighlightError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            HighlightError::Config(format!(
                "Failed to write config to {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Policy actually applied: validation is always on in debug builds
    pub fn effective_policy(&self) -> OverlapPolicy {
        if !self.validate_in_release && !cfg!(debug_assertions) {
            OverlapPolicy::Unchecked
        } else {
            self.overlap_policy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = OverlayConfig::from_yaml("{}").unwrap();
        assert_eq!(config, OverlayConfig::default());
        assert_eq!(config.overlap_policy, OverlapPolicy::DropHighlight);
        assert!(config.validate_in_release);
    }

    #[test]
    fn test_parse_fields() {
        let config =
            OverlayConfig::from_yaml("overlap_policy: reject\noutput: json\nvalidate_in_release: false\n")
                .unwrap();
        assert_eq!(config.overlap_policy, OverlapPolicy::Reject);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(!config.validate_in_release);
    }

    #[test]
    fn test_validated_policy_is_configured_policy() {
        let config = OverlayConfig {
            overlap_policy: OverlapPolicy::Reject,
            ..OverlayConfig::default()
        };
        assert_eq!(config.effective_policy(), OverlapPolicy::Reject);
    }
}
