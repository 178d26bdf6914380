use std::path::Path;

use quietgate_vad::DetectorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Process-wide configuration. The `[detector]` table carries the default
/// thresholds applied when a start command gives no overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub detector: DetectorConfig,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Settings {
    /// Load settings from a TOML file. A missing file is not an error:
    /// built-in defaults apply. Reloading is just calling this again.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "no settings file; using built-in defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&raw)?;
        info!(path = %path.display(), detector = ?settings.detector, "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.detector, DetectorConfig::default());
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quietgate.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[detector]\nsilence_threshold = 512\ntimeout_ms = 5000").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.detector.silence_threshold, 512);
        assert_eq!(settings.detector.timeout_ms, 5_000);
        assert_eq!(settings.detector.silence_hits, 100);
        assert_eq!(settings.detector.listen_hits, 15);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quietgate.toml");
        std::fs::write(&path, "[detector\nnope").unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::Parse(_))
        ));
    }
}
