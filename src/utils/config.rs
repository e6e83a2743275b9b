use crate::utils::errors::{Result, TranslatorError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub pacing: PacingConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub model: String,
    /// Left unset, requests use the transport's default (no timeout).
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub sheet_name: String,
    pub column_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-pro-latest".to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Translations".to_string(),
            column_name: "German Translation".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl PacingConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl AppConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TranslatorError::ConfigError(e.to_string()))?;
        toml::from_str(&content).map_err(|e| TranslatorError::ConfigError(e.to_string()))
    }

    /// A missing file yields defaults; a file that exists but does not parse is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load_from_file(p),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.model, "gemini-1.5-pro-latest");
        assert_eq!(config.pacing.delay(), Duration::from_millis(500));
        assert_eq!(config.output.sheet_name, "Translations");
        assert_eq!(config.output.column_name, "German Translation");
        assert!(config.api.timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pacing]\ndelay_ms = 0\n\n[api]\nmodel = \"gemini-1.5-flash\"").unwrap();

        let config = AppConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.pacing.delay_ms, 0);
        assert_eq!(config.api.model, "gemini-1.5-flash");
        assert!(config.api.endpoint.starts_with("https://generativelanguage"));
        assert_eq!(config.output.sheet_name, "Translations");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config.pacing.delay_ms, 500);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pacing\ndelay_ms = ").unwrap();

        let err = AppConfig::load_or_default(Some(file.path())).unwrap_err();
        assert!(matches!(err, TranslatorError::ConfigError(_)));
    }
}
