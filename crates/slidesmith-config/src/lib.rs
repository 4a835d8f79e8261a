use serde::{Deserialize, Serialize};
use slidesmith_engine::style::{SlideSize, extract_css_classes, slide_styles_css};
use slidesmith_engine::validate::Validator;
use std::path::{Path, PathBuf};
use thiserror::Error;

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

    #[error("Failed to read stylesheet at {stylesheet_path}: {source}")]
    StylesheetReadError {
        stylesheet_path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra stylesheet whose classes count as defined when validating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet_path: Option<PathBuf>,
    pub slide_size: SlideSize,
    /// Class names to accept without a stylesheet rule.
    pub extra_classes: Vec<String>,
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

        // Expand shell variables and tilde in the stylesheet path
        config.stylesheet_path = config
            .stylesheet_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
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

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/slidesmith");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Validator for the configured slide size, extended with the classes of
    /// the extra stylesheet and `extra_classes`.
    pub fn validator(&self) -> Result<Validator, ConfigError> {
        let mut validator = Validator::with_stylesheet(&slide_styles_css(self.slide_size));
        if let Some(path) = &self.stylesheet_path {
            let css = std::fs::read_to_string(path).map_err(|source| {
                ConfigError::StylesheetReadError {
                    stylesheet_path: path.clone(),
                    source,
                }
            })?;
            validator = validator.with_extra_classes(extract_css_classes(&css));
        }
        Ok(validator.with_extra_classes(self.extra_classes.iter().cloned()))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
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

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/slidesmith/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.slide_size, SlideSize::A4Landscape);
    }

    #[test]
    fn test_slide_size_from_toml() {
        let config: Config = toml::from_str(r#"slide_size = "16-9""#).unwrap();
        assert_eq!(config.slide_size, SlideSize::Widescreen);
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("SLIDESMITH_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$SLIDESMITH_TEST_VAR/theme.css");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/theme.css")));

        unsafe {
            env::remove_var("SLIDESMITH_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/themes/dark.css")).unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("themes/dark.css"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from_path(temp_dir.path().join("nonexistent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "slide_size = 3").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            stylesheet_path: Some(PathBuf::from("/tmp/theme.css")),
            slide_size: SlideSize::Widescreen,
            extra_classes: vec!["brand".to_string()],
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, test_config);
    }

    #[test]
    fn test_validator_accepts_configured_classes() {
        // Given a user stylesheet and an extra class
        let temp_dir = TempDir::new().unwrap();
        let css = temp_dir.path().join("theme.css");
        std::fs::write(&css, ".brand-banner { color: navy; }").unwrap();
        let config = Config {
            stylesheet_path: Some(css),
            extra_classes: vec!["animated".to_string()],
            ..Config::default()
        };

        // When the validator is built
        let validator = config.validator().unwrap();

        // Then shipped, stylesheet and extra classes are all defined
        assert!(validator.defines("slide"));
        assert!(validator.defines("brand-banner"));
        assert!(validator.defines("animated"));
        assert!(!validator.defines("unknown-class"));
    }

    #[test]
    fn test_validator_reports_missing_stylesheet() {
        let config = Config {
            stylesheet_path: Some(PathBuf::from("/this/path/does/not/exist.css")),
            ..Config::default()
        };
        assert!(matches!(
            config.validator(),
            Err(ConfigError::StylesheetReadError { .. })
        ));
    }
}
