use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event_log::trace_log::ActivitySeparator;

///
/// Error encountered while loading an [`AlphaRelationsConfig`]
///
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("Failed to read config: {0}")]
    IOError(#[from] std::io::Error),
    /// Invalid JSON
    #[error("Invalid config JSON: {0}")]
    JSONError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Parameters for relation discovery and grouping
///
/// All fields are optional in JSON; missing fields take their default value.
pub struct AlphaRelationsConfig {
    /// Use rayon for classification, growth and pruning (the result is the same either way)
    pub parallel: bool,
    /// Upper bound on growth passes before giving up; `None` runs until the fixpoint
    pub max_growth_passes: Option<usize>,
    /// How log lines are split into activities
    pub separator: ActivitySeparator,
}

impl AlphaRelationsConfig {
    /// Serialize parameters to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
    /// Deserialize parameters from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
    /// Read parameters from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = AlphaRelationsConfig::from_json(r#"{"parallel": true}"#).unwrap();
        assert!(cfg.parallel);
        assert_eq!(cfg.max_growth_passes, None);
        assert_eq!(cfg.separator, ActivitySeparator::Character);
    }

    #[test]
    fn json_round_trip() {
        let cfg = AlphaRelationsConfig {
            parallel: false,
            max_growth_passes: Some(12),
            separator: ActivitySeparator::Delimiter(';'),
        };
        let json = cfg.to_json().unwrap();
        assert!(json.contains(r#""separator":{"delimiter":";"}"#));
        assert_eq!(AlphaRelationsConfig::from_json(&json).unwrap(), cfg);
    }

    #[test]
    fn from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"max_growth_passes": 4, "separator": "character"}"#).unwrap();
        let cfg = AlphaRelationsConfig::from_path(&path).unwrap();
        assert_eq!(cfg.max_growth_passes, Some(4));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            AlphaRelationsConfig::from_path(&path),
            Err(ConfigError::JSONError(_))
        ));
    }
}
