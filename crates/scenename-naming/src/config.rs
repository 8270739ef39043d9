//! Naming configuration.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use scenename_core::ConfigError;

/// Separators and number/date formats used by the default namers.
///
/// Use the builder pattern to create a configuration:
///
/// ```
/// use scenename_naming::config::NamingConfig;
///
/// let config = NamingConfig::builder()
///     .number_width(3)
///     .range_separator("..")
///     .build();
/// assert_eq!(config.number_width, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Separator between parts of a plain media name.
    /// Default: " "
    pub default_separator: String,

    /// Separator between parts of a release or subtitle name.
    /// Default: "."
    pub release_separator: String,

    /// Separator between independently named items of a list.
    /// Default: ", "
    pub item_separator: String,

    /// Separator between the first and last number of a consecutive run.
    /// Default: "-"
    pub range_separator: String,

    /// Separator before each additional, non-consecutive number.
    /// Default: "+"
    pub addition_separator: String,

    /// Separator before a release or subtitle group.
    /// Default: "-"
    pub group_separator: String,

    /// Default: "S"
    pub season_prefix: String,

    /// Default: "E"
    pub episode_prefix: String,

    /// Minimum digits of season and episode numbers.
    /// Default: 2
    pub number_width: usize,

    /// chrono format of episode air dates.
    /// Default: "%Y.%m.%d"
    pub date_format: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            default_separator: " ".to_string(),
            release_separator: ".".to_string(),
            item_separator: ", ".to_string(),
            range_separator: "-".to_string(),
            addition_separator: "+".to_string(),
            group_separator: "-".to_string(),
            season_prefix: "S".to_string(),
            episode_prefix: "E".to_string(),
            number_width: 2,
            date_format: "%Y.%m.%d".to_string(),
        }
    }
}

impl NamingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> NamingConfigBuilder {
        NamingConfigBuilder::default()
    }

    /// Check that the configuration can produce decodable names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.range_separator.is_empty() {
            return Err(ConfigError::invalid_value(
                "range_separator",
                "must not be empty",
            ));
        }
        if self.addition_separator.is_empty() {
            return Err(ConfigError::invalid_value(
                "addition_separator",
                "must not be empty",
            ));
        }
        if !(1..=4).contains(&self.number_width) {
            return Err(ConfigError::invalid_value(
                "number_width",
                format!("must be between 1 and 4, got {}", self.number_width),
            ));
        }
        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ConfigError::invalid_value(
                "date_format",
                format!("{:?} is not a valid date format", self.date_format),
            ));
        }
        Ok(())
    }
}

/// Builder for `NamingConfig`.
#[derive(Debug, Clone, Default)]
pub struct NamingConfigBuilder {
    config: NamingConfig,
}

impl NamingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.default_separator = separator.into();
        self
    }

    pub fn release_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.release_separator = separator.into();
        self
    }

    pub fn item_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.item_separator = separator.into();
        self
    }

    pub fn range_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.range_separator = separator.into();
        self
    }

    pub fn addition_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.addition_separator = separator.into();
        self
    }

    pub fn group_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.group_separator = separator.into();
        self
    }

    pub fn season_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.season_prefix = prefix.into();
        self
    }

    pub fn episode_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.episode_prefix = prefix.into();
        self
    }

    pub fn number_width(mut self, width: usize) -> Self {
        self.config.number_width = width;
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    pub fn build(self) -> NamingConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = NamingConfig::default();
        assert_eq!(config.release_separator, ".");
        assert_eq!(config.number_width, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = NamingConfig::builder()
            .season_prefix("s")
            .episode_prefix("e")
            .group_separator("_")
            .build();
        assert_eq!(config.season_prefix, "s");
        assert_eq!(config.episode_prefix, "e");
        assert_eq!(config.group_separator, "_");
        assert_eq!(config.range_separator, "-");
    }

    #[test]
    fn rejects_empty_range_separator() {
        let config = NamingConfig::builder().range_separator("").build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("range_separator"));
    }

    #[test]
    fn rejects_out_of_range_width() {
        for width in [0, 5] {
            let config = NamingConfig::builder().number_width(width).build();
            assert!(config.validate().is_err(), "width {width} accepted");
        }
    }

    #[test]
    fn rejects_bad_date_format() {
        let config = NamingConfig::builder().date_format("%Y.%Q").build();
        assert!(config.validate().is_err());
    }
}
