//! Configuration document loading, validation and saving.
//!
//! Decoding happens in two steps. The text is first parsed as a generic
//! YAML tree; failure there (or a root that is not a mapping) is a
//! [`ConfigError::Parse`]. Each field is then pulled out of the tree on its
//! own so that a wrong type or out-of-range value is reported as a
//! [`ConfigError::Validation`] naming the dotted field path.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::sections::{
    AppSection, BotSection, CheckerSection, LogLevel, LoggingSection, UpdateKind,
};
use crate::logging::{LogFormat, validate_date_format};

const SECTIONS: [&str; 4] = ["app", "checker", "bot", "logging"];

/// Errors that can occur while loading or saving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Failed to write configuration file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl ConfigError {
    fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the offending field for validation errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Validated bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub app: AppSection,
    pub checker: CheckerSection,
    pub bot: BotSection,
    pub logging: LoggingSection,
}

impl Configuration {
    /// Builds a configuration from the default sections.
    #[must_use]
    pub fn with_app(app: AppSection) -> Self {
        Self {
            app,
            checker: CheckerSection::default(),
            bot: BotSection::default(),
            logging: LoggingSection::default(),
        }
    }

    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file is missing,
    /// [`ConfigError::Parse`] if it is not UTF-8 text holding a YAML mapping, and
    /// [`ConfigError::Validation`] if any field is invalid.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound {
                path: path_str.clone(),
            },
            ErrorKind::InvalidData => ConfigError::Parse {
                path: path_str.clone(),
                message: "file is not valid UTF-8 text".to_owned(),
            },
            _ => ConfigError::Read {
                path: path_str.clone(),
                source: e,
            },
        })?;

        debug!("Loaded {} bytes from {}", content.len(), path_str);
        Self::decode(&content, &path_str)
    }

    /// Parses and validates configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Same as [`Configuration::load_from_file`], minus the I/O cases.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Self::decode(text, "<string>")
    }

    /// Serializes the configuration back to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Saves configuration to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_yaml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Checks range and cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("app.name", &self.app.name)?;
        non_empty("app.version", &self.app.version)?;

        let checker = &self.checker;
        positive("checker.batch_size", u64::from(checker.batch_size))?;
        positive("checker.max_usernames", u64::from(checker.max_usernames))?;
        positive("checker.retry_delay", checker.retry_delay)?;
        positive("checker.max_retries", u64::from(checker.max_retries))?;
        if checker.batch_size > checker.max_usernames {
            return Err(ConfigError::validation(
                "checker.batch_size",
                format!(
                    "batch_size ({}) must not exceed max_usernames ({})",
                    checker.batch_size, checker.max_usernames
                ),
            ));
        }

        positive("bot.timeout", self.bot.timeout)?;
        positive("bot.workers", u64::from(self.bot.workers))?;
        let mut seen = HashSet::new();
        for (index, kind) in self.bot.allowed_updates.iter().enumerate() {
            if !seen.insert(kind) {
                return Err(ConfigError::validation(
                    format!("bot.allowed_updates[{index}]"),
                    format!("duplicate update type '{kind}'"),
                ));
            }
        }

        validate_date_format(&self.logging.date_format)
            .map_err(|e| ConfigError::validation("logging.date_format", e.to_string()))?;

        Ok(())
    }

    /// Creates an example configuration for users to reference.
    #[must_use]
    pub fn example() -> Self {
        Self::with_app(AppSection::new("Username Finder Bot", env!("CARGO_PKG_VERSION")))
    }

    fn decode(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_owned(),
            message: e.to_string(),
        })?;

        let empty = Mapping::new();
        let root = match &root {
            Value::Null => &empty,
            Value::Mapping(map) => map,
            other => {
                return Err(ConfigError::Parse {
                    path: origin.to_owned(),
                    message: format!("expected a mapping at the document root, found {}", kind(other)),
                });
            }
        };

        warn_unknown_keys("", root, &SECTIONS);

        let config = Self {
            app: decode_app(&Section::from_root(root, "app")?)?,
            checker: decode_checker(&Section::from_root(root, "checker")?)?,
            bot: decode_bot(&Section::from_root(root, "bot")?)?,
            logging: decode_logging(&Section::from_root(root, "logging")?)?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// A top-level section of the document; absent or `null` sections are empty.
struct Section<'a> {
    name: &'static str,
    map: Option<&'a Mapping>,
}

impl<'a> Section<'a> {
    fn from_root(root: &'a Mapping, name: &'static str) -> Result<Self, ConfigError> {
        match root.get(name) {
            None | Some(Value::Null) => Ok(Self { name, map: None }),
            Some(Value::Mapping(map)) => Ok(Self {
                name,
                map: Some(map),
            }),
            Some(other) => Err(ConfigError::validation(
                name,
                format!("expected a mapping, found {}", kind(other)),
            )),
        }
    }

    fn path(&self, key: &str) -> String {
        format!("{}.{key}", self.name)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map
            .and_then(|map| map.get(key))
            .filter(|value| !value.is_null())
    }

    fn warn_unknown(&self, known: &[&str]) {
        if let Some(map) = self.map {
            warn_unknown_keys(self.name, map, known);
        }
    }

    fn required_string(&self, key: &str) -> Result<String, ConfigError> {
        self.optional_string(key)?
            .ok_or_else(|| ConfigError::validation(self.path(key), "is required"))
    }

    fn optional_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            // Integers print back exactly; floats like `1.10` would not.
            Some(Value::Number(n)) if !n.is_f64() => Ok(Some(n.to_string())),
            Some(Value::Number(n)) => Err(ConfigError::validation(
                self.path(key),
                format!("expected a string, found the number {n}; quote the value to keep it exact"),
            )),
            Some(other) => Err(ConfigError::validation(
                self.path(key),
                format!("expected a string, found {}", kind(other)),
            )),
        }
    }

    fn positive_int(&self, key: &str) -> Result<Option<u64>, ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let Value::Number(number) = value else {
            return Err(ConfigError::validation(
                self.path(key),
                format!("expected an integer, found {}", kind(value)),
            ));
        };
        if let Some(n) = number.as_u64() {
            if n == 0 {
                return Err(ConfigError::validation(self.path(key), "must be greater than 0"));
            }
            return Ok(Some(n));
        }
        if number.as_i64().is_some() {
            return Err(ConfigError::validation(self.path(key), "must be greater than 0"));
        }
        Err(ConfigError::validation(
            self.path(key),
            format!("expected an integer, found {number}"),
        ))
    }

    fn u64_or(&self, key: &str, default: u64) -> Result<u64, ConfigError> {
        Ok(self.positive_int(key)?.unwrap_or(default))
    }

    fn u32_or(&self, key: &str, default: u32) -> Result<u32, ConfigError> {
        match self.positive_int(key)? {
            None => Ok(default),
            Some(n) => u32::try_from(n).map_err(|_| {
                ConfigError::validation(self.path(key), format!("{n} is out of range"))
            }),
        }
    }
}

fn decode_app(section: &Section<'_>) -> Result<AppSection, ConfigError> {
    section.warn_unknown(&["name", "version"]);
    Ok(AppSection {
        name: section.required_string("name")?,
        version: section.required_string("version")?,
    })
}

fn decode_checker(section: &Section<'_>) -> Result<CheckerSection, ConfigError> {
    section.warn_unknown(&["batch_size", "max_usernames", "retry_delay", "max_retries"]);
    let defaults = CheckerSection::default();
    Ok(CheckerSection {
        batch_size: section.u32_or("batch_size", defaults.batch_size)?,
        max_usernames: section.u32_or("max_usernames", defaults.max_usernames)?,
        retry_delay: section.u64_or("retry_delay", defaults.retry_delay)?,
        max_retries: section.u32_or("max_retries", defaults.max_retries)?,
    })
}

fn decode_bot(section: &Section<'_>) -> Result<BotSection, ConfigError> {
    section.warn_unknown(&["timeout", "workers", "allowed_updates"]);
    let defaults = BotSection::default();

    let allowed_updates = match section.get("allowed_updates") {
        None => defaults.allowed_updates,
        Some(Value::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let field = format!("{}[{index}]", section.path("allowed_updates"));
                match item {
                    Value::String(name) => name
                        .parse::<UpdateKind>()
                        .map_err(|e| ConfigError::validation(field, e.to_string())),
                    other => Err(ConfigError::validation(
                        field,
                        format!("expected a string, found {}", kind(other)),
                    )),
                }
            })
            .collect::<Result<_, _>>()?,
        Some(other) => {
            return Err(ConfigError::validation(
                section.path("allowed_updates"),
                format!("expected a list, found {}", kind(other)),
            ));
        }
    };

    Ok(BotSection {
        timeout: section.u64_or("timeout", defaults.timeout)?,
        workers: section.u32_or("workers", defaults.workers)?,
        allowed_updates,
    })
}

fn decode_logging(section: &Section<'_>) -> Result<LoggingSection, ConfigError> {
    section.warn_unknown(&["level", "format", "date_format"]);
    let defaults = LoggingSection::default();

    let level = match section.optional_string("level")? {
        None => defaults.level,
        Some(name) => name
            .parse::<LogLevel>()
            .map_err(|e| ConfigError::validation(section.path("level"), e.to_string()))?,
    };

    let format = match section.optional_string("format")? {
        None => defaults.format,
        Some(template) => LogFormat::parse(&template)
            .map_err(|e| ConfigError::validation(section.path("format"), e.to_string()))?,
    };

    let date_format = section
        .optional_string("date_format")?
        .unwrap_or(defaults.date_format);

    Ok(LoggingSection {
        level,
        format,
        date_format,
    })
}

fn non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn positive(field: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::validation(field, "must be greater than 0"));
    }
    Ok(())
}

fn warn_unknown_keys(section: &str, map: &Mapping, known: &[&str]) {
    for key in map.keys() {
        let name = key.as_str().map_or_else(|| format!("{key:?}"), str::to_owned);
        if !known.contains(&name.as_str()) {
            if section.is_empty() {
                warn!("Ignoring unknown configuration section '{}'", name);
            } else {
                warn!("Ignoring unknown configuration key '{}.{}'", section, name);
            }
        }
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
app:
  name: "Username Finder"
  version: "2.1.0"
checker:
  batch_size: 10
  max_usernames: 40
  retry_delay: 1
  max_retries: 5
bot:
  timeout: 60
  workers: 8
  allowed_updates: ["message", "callback_query", "my_chat_member"]
logging:
  level: DEBUG
  format: "%(asctime)s [%(levelname)-8s] %(message)s"
  date_format: "%H:%M:%S"
"#;

    const MINIMAL: &str = "app:\n  name: bot\n  version: '1.0'\n";

    fn field_of(result: Result<Configuration, ConfigError>) -> String {
        match result {
            Err(ConfigError::Validation { field, .. }) => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_full_document() {
        let config = Configuration::from_yaml_str(FULL).unwrap();
        assert_eq!(config.app, AppSection::new("Username Finder", "2.1.0"));
        assert_eq!(config.checker.batch_size, 10);
        assert_eq!(config.checker.max_retries, 5);
        assert_eq!(config.bot.workers, 8);
        assert_eq!(
            config.bot.allowed_updates,
            vec![
                UpdateKind::Message,
                UpdateKind::CallbackQuery,
                UpdateKind::MyChatMember
            ]
        );
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.date_format, "%H:%M:%S");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Configuration::from_yaml_str(MINIMAL).unwrap();
        assert_eq!(config.checker, CheckerSection::default());
        assert_eq!(config.bot, BotSection::default());
        assert_eq!(config.logging, LoggingSection::default());
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let yaml = format!("{MINIMAL}checker:\n  batch_size: 3\nbot:\n");
        let config = Configuration::from_yaml_str(&yaml).unwrap();
        assert_eq!(config.checker.batch_size, 3);
        assert_eq!(config.checker.max_usernames, 30);
        assert_eq!(config.bot, BotSection::default());
    }

    #[test]
    fn test_round_trip_is_stable() {
        let config = Configuration::from_yaml_str(FULL).unwrap();
        let yaml = config.to_yaml_string().unwrap();
        let reloaded = Configuration::from_yaml_str(&yaml).unwrap();
        assert_eq!(config, reloaded);

        let example = Configuration::example();
        let reloaded = Configuration::from_yaml_str(&example.to_yaml_string().unwrap()).unwrap();
        assert_eq!(example, reloaded);
    }

    #[test]
    fn test_integer_version_is_kept_as_text() {
        let config = Configuration::from_yaml_str("app:\n  name: bot\n  version: 2\n").unwrap();
        assert_eq!(config.app.version, "2");
    }

    #[test]
    fn test_float_version_must_be_quoted() {
        for version in ["1.10", "1e3"] {
            let yaml = format!("app:\n  name: bot\n  version: {version}\n");
            assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "app.version");
        }

        let config = Configuration::from_yaml_str("app:\n  name: bot\n  version: '1.10'\n").unwrap();
        assert_eq!(config.app.version, "1.10");
    }

    #[test]
    fn test_batch_size_above_max_usernames() {
        let yaml = format!("{MINIMAL}checker:\n  batch_size: 31\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "checker.batch_size");
    }

    #[test]
    fn test_zero_and_negative_integers() {
        let yaml = format!("{MINIMAL}bot:\n  workers: 0\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "bot.workers");

        let yaml = format!("{MINIMAL}checker:\n  retry_delay: -2\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "checker.retry_delay");
    }

    #[test]
    fn test_wrong_types_are_validation_errors() {
        let yaml = format!("{MINIMAL}bot:\n  timeout: thirty\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "bot.timeout");

        let yaml = format!("{MINIMAL}checker:\n  max_retries: 2.5\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "checker.max_retries");

        let yaml = format!("{MINIMAL}checker: 5\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "checker");
    }

    #[test]
    fn test_out_of_range_u32() {
        let yaml = format!("{MINIMAL}bot:\n  workers: 5000000000\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "bot.workers");
    }

    #[test]
    fn test_app_fields_required_and_non_empty() {
        assert_eq!(field_of(Configuration::from_yaml_str("")), "app.name");
        assert_eq!(
            field_of(Configuration::from_yaml_str("app:\n  name: bot\n")),
            "app.version"
        );
        assert_eq!(
            field_of(Configuration::from_yaml_str("app:\n  name: '  '\n  version: '1'\n")),
            "app.name"
        );
    }

    #[test]
    fn test_unknown_log_level() {
        let yaml = format!("{MINIMAL}logging:\n  level: TRACE\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "logging.level");
    }

    #[test]
    fn test_lowercase_log_level_is_accepted() {
        let yaml = format!("{MINIMAL}logging:\n  level: warning\n");
        let config = Configuration::from_yaml_str(&yaml).unwrap();
        assert_eq!(config.logging.level, LogLevel::Warning);
    }

    #[test]
    fn test_bad_log_format_and_date_format() {
        let yaml = format!("{MINIMAL}logging:\n  format: '%(user)s'\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "logging.format");

        let yaml = format!("{MINIMAL}logging:\n  format: ''\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "logging.format");

        let yaml = format!("{MINIMAL}logging:\n  date_format: '%Y-%'\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "logging.date_format");

        let yaml = format!("{MINIMAL}logging:\n  date_format: '%#z'\n");
        assert_eq!(field_of(Configuration::from_yaml_str(&yaml)), "logging.date_format");
    }

    #[test]
    fn test_allowed_updates_validation() {
        let yaml = format!("{MINIMAL}bot:\n  allowed_updates: [message, inline_query, bogus]\n");
        assert_eq!(
            field_of(Configuration::from_yaml_str(&yaml)),
            "bot.allowed_updates[2]"
        );

        let yaml = format!("{MINIMAL}bot:\n  allowed_updates: [message, message]\n");
        assert_eq!(
            field_of(Configuration::from_yaml_str(&yaml)),
            "bot.allowed_updates[1]"
        );

        let yaml = format!("{MINIMAL}bot:\n  allowed_updates: message\n");
        assert_eq!(
            field_of(Configuration::from_yaml_str(&yaml)),
            "bot.allowed_updates"
        );

        let yaml = format!("{MINIMAL}bot:\n  allowed_updates: []\n");
        let config = Configuration::from_yaml_str(&yaml).unwrap();
        assert!(config.bot.allowed_updates.is_empty());
    }

    #[test]
    fn test_malformed_documents_are_parse_errors() {
        assert!(matches!(
            Configuration::from_yaml_str("app: [unclosed"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Configuration::from_yaml_str("- just\n- a list\n"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Configuration::from_yaml_str("plain scalar"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let yaml = format!("{MINIMAL}extra:\n  a: 1\nchecker:\n  speed: fast\n");
        let config = Configuration::from_yaml_str(&yaml).unwrap();
        assert_eq!(config.checker, CheckerSection::default());
    }

    #[test]
    fn test_validate_programmatic_values() {
        let mut config = Configuration::example();
        assert!(config.validate().is_ok());

        config.checker.max_usernames = 0;
        assert_eq!(config.validate().unwrap_err().field(), Some("checker.max_usernames"));

        let mut config = Configuration::example();
        config.logging.date_format = String::new();
        assert_eq!(config.validate().unwrap_err().field(), Some("logging.date_format"));
    }

    #[test]
    fn test_error_messages() {
        let error = ConfigError::NotFound {
            path: "/missing/config.yaml".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/config.yaml"
        );

        let error = ConfigError::validation("bot.workers", "must be greater than 0");
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for 'bot.workers': must be greater than 0"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        match Configuration::load_from_file(&path) {
            Err(ConfigError::NotFound { path: reported }) => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = Configuration::from_yaml_str(FULL).unwrap();
        config.save_to_file(&path).unwrap();

        assert_eq!(Configuration::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "checker:\n  batch_size: [1, 2\n").unwrap();

        match Configuration::load_from_file(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_load_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.yaml");
        std::fs::write(&path, b"app:\n  name: \xff\xfe\n").unwrap();

        assert!(matches!(
            Configuration::load_from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Configuration::load_from_file(dir.path()),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_invalid_file_names_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "app:\n  name: bot\n  version: '1.0'\nlogging:\n  level: TRACE\n",
        )
        .unwrap();

        let error = Configuration::load_from_file(&path).unwrap_err();
        assert_eq!(error.field(), Some("logging.level"));
    }
}
