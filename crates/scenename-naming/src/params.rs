//! Naming parameters passed down through nested namers.

use std::collections::BTreeMap;

use scenename_core::Release;

/// Well-known parameter keys understood by the default namers.
pub mod keys {
    /// Include the parent series in season and episode names. Default: true.
    pub const INCLUDE_SERIES: &str = "include_series";
    /// Include the season in episode names. Default: true.
    pub const INCLUDE_SEASON: &str = "include_season";
    /// Include decorative titles of numbered seasons and episodes. Default: true.
    pub const INCLUDE_TITLE: &str = "include_title";
    /// Include decorative titles even inside release names. Default: false.
    pub const ALWAYS_INCLUDE_TITLE: &str = "always_include_title";
    /// Include the year of series and movies. Default: true.
    pub const INCLUDE_YEAR: &str = "include_year";
    /// Use the stored literal name of releases when present. Default: false.
    pub const PREFER_LITERAL_NAME: &str = "prefer_literal_name";
    /// The release a subtitle release should be named after.
    pub const EXPLICIT_RELEASE: &str = "explicit_release";
}

/// A single naming parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    Text(String),
    Release(Box<Release>),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Release> for ParamValue {
    fn from(value: Release) -> Self {
        ParamValue::Release(Box::new(value))
    }
}

/// String-keyed parameters controlling optional parts of a name.
///
/// Namers never mutate the parameters they receive; a namer that wants to
/// change a flag for a nested namer passes a copy built with [`with`].
///
/// [`with`]: NamingParams::with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingParams {
    values: BTreeMap<String, ParamValue>,
}

impl NamingParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of these parameters with `key` set to `value`.
    pub fn with(&self, key: &str, value: impl Into<ParamValue>) -> Self {
        let mut params = self.clone();
        params.set(key, value);
        params
    }

    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Boolean value of `key`, or `default` if unset or not a boolean.
    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(ParamValue::Bool(b)) => *b,
            _ => default,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ParamValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn release(&self, key: &str) -> Option<&Release> {
        match self.values.get(key) {
            Some(ParamValue::Release(r)) => Some(r),
            _ => None,
        }
    }
}
