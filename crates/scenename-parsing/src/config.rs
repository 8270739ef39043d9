//! Parser configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scenename_core::ConfigError;

/// Vocabulary added to the built-in release tags and languages.
///
/// ```
/// use scenename_parsing::config::ParsingConfig;
///
/// let config = ParsingConfig::builder()
///     .extra_tag("NORDiC")
///     .extra_language("sv", "Swedish")
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Additional tokens recognized as the start of a release tag list,
    /// matched case-insensitively.
    pub extra_tags: Vec<String>,

    /// Additional subtitle language tokens, mapped to the language name.
    pub extra_languages: BTreeMap<String, String>,
}

impl ParsingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ParsingConfigBuilder {
        ParsingConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for tag in &self.extra_tags {
            if tag.is_empty() || tag.chars().any(char::is_whitespace) {
                return Err(ConfigError::invalid_value(
                    "extra_tags",
                    format!("{tag:?} must be a non-empty token without whitespace"),
                ));
            }
        }
        for (token, language) in &self.extra_languages {
            if !is_token(token) {
                return Err(ConfigError::invalid_value(
                    "extra_languages",
                    format!("{token:?} must be a non-empty token without separators"),
                ));
            }
            if language.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "extra_languages",
                    format!("language for {token:?} must not be empty"),
                ));
            }
        }
        Ok(())
    }
}

fn is_token(text: &str) -> bool {
    !text.is_empty()
        && !text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '.' | '_' | '-'))
}

/// Builder for `ParsingConfig`.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    config: ParsingConfig,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extra_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.extra_tags.push(tag.into());
        self
    }

    pub fn extra_language(mut self, token: impl Into<String>, language: impl Into<String>) -> Self {
        self.config
            .extra_languages
            .insert(token.into(), language.into());
        self
    }

    pub fn build(self) -> ParsingConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_and_valid() {
        let config = ParsingConfig::default();
        assert!(config.extra_tags.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_tags_with_separators() {
        let config = ParsingConfig::builder().extra_tag("WEB DL").build();
        assert!(config.validate().is_err());
        let config = ParsingConfig::builder().extra_tag("").build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_language_names() {
        let config = ParsingConfig::builder().extra_language("sv", " ").build();
        assert!(config.validate().is_err());
    }
}
