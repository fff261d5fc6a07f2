//! Configuration file support for the Yoga Pose Suggester.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/yoga/config.toml`.

use crate::{CatalogEntry, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub transcription: TranscriptionConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl DataConfig {
    /// Location of the transient recording artifact
    pub fn recording_path(&self) -> PathBuf {
        self.data_dir.join("recording.wav")
    }
}

/// Audio capture configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: u64,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration_seconds(),
            sample_rate: default_sample_rate(),
            device: default_device(),
        }
    }
}

impl AudioConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_seconds)
    }
}

/// Transcription service configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            language: default_language(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Extra pain areas appended after the built-in catalog
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub custom: Vec<CatalogEntry>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|_| PathBuf::from("."))
    });
    base.join("yoga")
}

fn default_duration_seconds() -> u64 {
    5
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_device() -> String {
    "default".into()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/audio/transcriptions".into()
}

fn default_model() -> String {
    "whisper-1".into()
}

fn default_language() -> String {
    "en".into()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        base.join("yoga").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the recorder or transcriber cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.audio.duration_seconds == 0 {
            return Err(Error::Config("audio.duration_seconds must be > 0".into()));
        }
        if self.audio.sample_rate == 0 {
            return Err(Error::Config("audio.sample_rate must be > 0".into()));
        }
        if self.transcription.endpoint.trim().is_empty() {
            return Err(Error::Config("transcription.endpoint is empty".into()));
        }
        if self.transcription.timeout_seconds == 0 {
            return Err(Error::Config(
                "transcription.timeout_seconds must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audio.duration_seconds, 5);
        assert_eq!(config.audio.sample_rate, 16_000);
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.transcription.api_key_env, "OPENAI_API_KEY");
        assert!(config.catalog.custom.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.catalog.custom.push(CatalogEntry::new(
            "elbow",
            &["Eagle Arms", "Wrist Circles", "Prayer Stretch", "Table Top", "Cow Face Pose"],
        ));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.audio.duration_seconds, config.audio.duration_seconds);
        assert_eq!(loaded.catalog.custom, config.catalog.custom);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[audio]
duration_seconds = 8

[[catalog.custom]]
area = "elbow"
poses = ["Eagle Arms", "Wrist Circles", "Prayer Stretch", "Table Top", "Cow Face Pose"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.audio.duration_seconds, 8);
        assert_eq!(config.audio.sample_rate, 16_000); // default
        assert_eq!(config.transcription.model, "whisper-1"); // default
        assert_eq!(config.catalog.custom[0].area, "elbow");
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let mut config = Config::default();
        config.audio.duration_seconds = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_recording_path_in_data_dir() {
        let data = DataConfig {
            data_dir: PathBuf::from("/tmp/yoga"),
        };
        assert_eq!(data.recording_path(), PathBuf::from("/tmp/yoga/recording.wav"));
    }
}
