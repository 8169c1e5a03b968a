use crate::config::toml_config::{TomlConfig, CATALOG_EXTENSIONS, LOG_LEVELS};
use crate::core::engine::DEFAULT_MAX_SELECTABLE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PickerError, Result};
use crate::utils::validation::{self, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(PickerError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: other.to_string(),
                reason: "Valid values: compact, json".to_string(),
            }),
        }
    }
}

/// Effective settings after layering flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub max_selectable: usize,
    pub catalog_path: Option<String>,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_selectable: DEFAULT_MAX_SELECTABLE,
            catalog_path: None,
            log_level: None,
            log_format: LogFormat::Compact,
        }
    }
}

impl Settings {
    /// Flag values win over file values, which win over defaults.
    pub fn resolve(
        file: Option<&TomlConfig>,
        max_selectable: Option<usize>,
        catalog_path: Option<&str>,
    ) -> Result<Self> {
        let defaults = Settings::default();
        let file = file.cloned().unwrap_or_default();

        let log_format = match file.logging.format.as_deref() {
            Some(format) => format.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            max_selectable: max_selectable
                .or(file.selection.max_selectable)
                .unwrap_or(defaults.max_selectable),
            catalog_path: catalog_path.map(str::to_string).or(file.catalog.path),
            log_level: file.logging.level,
            log_format,
        })
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &crate::config::CliConfig, file: Option<&TomlConfig>) -> Result<Self> {
        Self::resolve(file, cli.max_selectable, cli.catalog.as_deref())
    }
}

impl ConfigProvider for Settings {
    fn max_selectable(&self) -> usize {
        self.max_selectable
    }

    fn catalog_path(&self) -> Option<&str> {
        self.catalog_path.as_deref()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("max_selectable", self.max_selectable, 1)?;

        if let Some(path) = &self.catalog_path {
            validation::validate_path("catalog", path)?;
            validation::validate_file_extension("catalog", path, &CATALOG_EXTENSIONS)?;
        }

        if let Some(level) = &self.log_level {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let settings = Settings::resolve(None, None, None).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_selectable(), 5);
        assert!(settings.catalog_path().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_flags_override_file() {
        let file = TomlConfig::from_toml_str(
            "[selection]\nmax_selectable = 3\n[catalog]\npath = \"fall.csv\"\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let from_file = Settings::resolve(Some(&file), None, None).unwrap();
        assert_eq!(from_file.max_selectable, 3);
        assert_eq!(from_file.catalog_path.as_deref(), Some("fall.csv"));
        assert_eq!(from_file.log_format, LogFormat::Json);

        let overridden = Settings::resolve(Some(&file), Some(2), Some("spring.tsv")).unwrap();
        assert_eq!(overridden.max_selectable, 2);
        assert_eq!(overridden.catalog_path.as_deref(), Some("spring.tsv"));
    }

    #[test]
    fn test_validation_rejects_bad_flags() {
        let zero = Settings::resolve(None, Some(0), None).unwrap();
        assert!(zero.validate().is_err());

        let wrong_extension = Settings::resolve(None, None, Some("courses.xlsx")).unwrap();
        assert!(wrong_extension.validate().is_err());
    }

    #[test]
    fn test_unknown_log_format_fails_resolution() {
        let file = TomlConfig::from_toml_str("[logging]\nformat = \"pretty\"\n").unwrap();
        assert!(Settings::resolve(Some(&file), None, None).is_err());
    }
}
