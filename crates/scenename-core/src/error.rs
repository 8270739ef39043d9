//! Error types shared by the naming and parsing crates.
//!
//! The taxonomy separates failures a caller can act on independently:
//!
//! - [`Error::NoMatch`]: no parser accepted the input. At the single-parser
//!   level this is a plain `None`; it only becomes an error at the service
//!   boundary.
//! - [`MappingError`]: a pattern matched but the captured strings could not
//!   be turned into the target entity.
//! - [`ConversionError`]: a value could not be converted to or from text.
//! - [`ConfigError`]: a matcher, separator rule or registration is malformed.

use crate::model::EntityKind;
use crate::property::{PropertyKey, PropertyMap};

/// A value could not be converted between its typed and textual form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert {value:?}{}: {reason}", key_suffix(.key))]
pub struct ConversionError {
    /// The property being converted, if the conversion was keyed.
    pub key: Option<PropertyKey>,
    /// The offending value, rendered as text.
    pub value: String,
    pub reason: String,
}

impl ConversionError {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Attach the property key the conversion was performed for.
    pub fn for_key(mut self, key: PropertyKey) -> Self {
        self.key = Some(key);
        self
    }
}

fn key_suffix(key: &Option<PropertyKey>) -> String {
    key.map(|k| format!(" for {k}")).unwrap_or_default()
}

/// A matched property map could not be mapped onto the target entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot map {properties} to {target}: {reason}")]
pub struct MappingError {
    pub target: EntityKind,
    pub properties: PropertyMap,
    pub reason: String,
    #[source]
    pub source: Option<ConversionError>,
}

impl MappingError {
    pub fn new(target: EntityKind, properties: &PropertyMap, reason: impl Into<String>) -> Self {
        Self {
            target,
            properties: properties.clone(),
            reason: reason.into(),
            source: None,
        }
    }

    /// A mapping failure caused by a failed value conversion.
    pub fn conversion(target: EntityKind, properties: &PropertyMap, err: ConversionError) -> Self {
        Self {
            target,
            properties: properties.clone(),
            reason: err.to_string(),
            source: Some(err),
        }
    }

    /// A required property is missing or blank.
    pub fn missing(target: EntityKind, properties: &PropertyMap, key: PropertyKey) -> Self {
        Self::new(target, properties, format!("missing property {key}"))
    }
}

/// Malformed configuration, detected when it is registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("pattern {pattern:?} has {available} capture groups, but group {group} is mapped")]
    GroupOutOfRange {
        pattern: String,
        group: usize,
        available: usize,
    },

    #[error("conflicting separator rules for {rule}: {first:?} vs {second:?}")]
    ConflictingSeparator {
        rule: String,
        first: String,
        second: String,
    },

    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level error of naming and parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No registered parser matched the input.
    #[error("no parser matched {input:?}")]
    NoMatch { input: String },

    /// No registered namer accepts the candidate.
    #[error("no namer registered for {kind}")]
    NoNamer { kind: EntityKind },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn no_match(input: impl Into<String>) -> Self {
        Self::NoMatch {
            input: input.into(),
        }
    }

    /// Whether this error only signals that nothing matched.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch { .. })
    }
}

/// Result alias using the codec [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::episode;

    #[test]
    fn conversion_error_display_includes_key() {
        let err = ConversionError::new("E0x", "invalid digit").for_key(episode::NUMBER_IN_SEASON);
        assert_eq!(
            err.to_string(),
            "cannot convert \"E0x\" for episode.numberInSeason: invalid digit"
        );
        let err = ConversionError::new("x", "bad");
        assert_eq!(err.to_string(), "cannot convert \"x\": bad");
    }

    #[test]
    fn mapping_error_keeps_properties_and_source() {
        let mut props = PropertyMap::new();
        props.insert(episode::NUMBER_IN_SEASON, "xx");
        let conv = ConversionError::new("xx", "invalid digit").for_key(episode::NUMBER_IN_SEASON);
        let err = MappingError::conversion(EntityKind::Episode, &props, conv.clone());
        assert_eq!(err.properties, props);
        assert_eq!(err.source, Some(conv));
        assert!(err
            .to_string()
            .starts_with("cannot map {episode.numberInSeason=\"xx\"} to episode"));
    }

    #[test]
    fn error_kinds_are_distinct() {
        assert!(Error::no_match("").is_no_match());
        let err: Error = ConfigError::invalid_value("number_width", "must be positive").into();
        assert!(!err.is_no_match());
        assert!(matches!(err, Error::Config(_)));
    }
}
