use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SUMMARIZER_URL: &str = "http://localhost:8045";
pub const DEFAULT_HIGHLIGHT_THEME: &str = "base16-ocean.dark";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Code block display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub wrap_long_lines: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_HIGHLIGHT_THEME.to_string(),
            wrap_long_lines: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the guide backend (`/flow/...` endpoints).
    pub api_base_url: String,
    /// Base URL of the research summarizer (`/run-research`).
    pub summarizer_url: String,
    pub highlight: HighlightConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            summarizer_url: DEFAULT_SUMMARIZER_URL.to_string(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand environment variables in the loaded URLs
        config.api_base_url = Self::expand(&config.api_base_url).unwrap_or(config.api_base_url);
        config.summarizer_url =
            Self::expand(&config.summarizer_url).unwrap_or(config.summarizer_url);

        Ok(Some(config))
    }

    /// Load from `config_path`, falling back to defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/guide-viewer");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand a user supplied path such as a `--config` argument.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        Self::expand(&path_str).map(PathBuf::from)
    }

    fn expand(value: &str) -> Option<String> {
        match shellexpand::full(value) {
            Ok(expanded) => Some(expanded.into_owned()),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/guide-viewer/config.toml"));
    }

    #[test]
    fn test_defaults_match_backend_ports() {
        let config = Config::default();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.summarizer_url, "http://localhost:8045");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert!(!config.highlight.wrap_long_lines);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            api_base_url: "http://guides.internal:9000".to_string(),
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
summarizer_url = "http://research:8045"

[highlight]
wrap_long_lines = true
"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.summarizer_url, "http://research:8045");
        assert_eq!(config.highlight.theme, DEFAULT_HIGHLIGHT_THEME);
        assert!(config.highlight.wrap_long_lines);
    }

    #[test]
    fn test_expand_with_env_var() {
        unsafe {
            env::set_var("GUIDE_VIEWER_TEST_HOST", "backend.local");
        }

        let expanded = Config::expand("http://$GUIDE_VIEWER_TEST_HOST:8000");
        assert_eq!(expanded.as_deref(), Some("http://backend.local:8000"));

        unsafe {
            env::remove_var("GUIDE_VIEWER_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/guides/config.toml")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("guides/config.toml"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
        assert_eq!(
            Config::load_or_default(&non_existent_config).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            summarizer_url: "http://127.0.0.1:8045".to_string(),
            highlight: HighlightConfig {
                theme: "InspiredGitHub".to_string(),
                wrap_long_lines: true,
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "api_base_url = [not toml").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
