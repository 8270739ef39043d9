//! Value conversion between typed property values and text.
//!
//! The [`ConverterService`] resolves a converter for a property in this
//! order: an override registered for the exact [`PropertyKey`], then one
//! registered for the value's [`ValueKind`], then one for each supertype of
//! that kind, and finally the default `Display`/parse behavior of [`Value`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::trace;

use crate::error::ConversionError;
use crate::model::{Group, Tag};
use crate::property::PropertyKey;

/// Runtime type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    /// Abstract supertype of [`ValueKind::Number`] and [`ValueKind::Year`].
    Integer,
    Number,
    Year,
    Date,
    Tags,
    Group,
}

impl ValueKind {
    /// The next more general kind, if any.
    pub fn supertype(self) -> Option<ValueKind> {
        match self {
            ValueKind::Number | ValueKind::Year => Some(ValueKind::Integer),
            _ => None,
        }
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Number(u32),
    Year(i32),
    Date(NaiveDate),
    Tags(Vec<Tag>),
    Group(Group),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Number(_) => ValueKind::Number,
            Value::Year(_) => ValueKind::Year,
            Value::Date(_) => ValueKind::Date,
            Value::Tags(_) => ValueKind::Tags,
            Value::Group(_) => ValueKind::Group,
        }
    }

    /// Default parsing of `text` into a value of `kind`.
    pub fn parse(text: &str, kind: ValueKind) -> Result<Value, ConversionError> {
        let text = text.trim();
        match kind {
            ValueKind::Text => Ok(Value::Text(text.to_string())),
            ValueKind::Integer | ValueKind::Number => text
                .parse::<u32>()
                .map(Value::Number)
                .map_err(|e| ConversionError::new(text, e.to_string())),
            ValueKind::Year => text
                .parse::<i32>()
                .map(Value::Year)
                .map_err(|e| ConversionError::new(text, e.to_string())),
            ValueKind::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|e| ConversionError::new(text, e.to_string())),
            ValueKind::Tags => Ok(Value::Tags(
                text.split_whitespace().map(Tag::new).collect(),
            )),
            ValueKind::Group => {
                if text.is_empty() {
                    Err(ConversionError::new(text, "empty group name"))
                } else {
                    Ok(Value::Group(Group::new(text)))
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Year(y) => write!(f, "{y}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Tags(tags) => {
                for (i, tag) in tags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(tag.as_str())?;
                }
                Ok(())
            }
            Value::Group(g) => f.write_str(g.as_str()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Year(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<&[Tag]> for Value {
    fn from(value: &[Tag]) -> Self {
        Value::Tags(value.to_vec())
    }
}

impl From<&Group> for Value {
    fn from(value: &Group) -> Self {
        Value::Group(value.clone())
    }
}

/// Converts values of one property or kind to and from text.
pub trait Converter: Send + Sync {
    fn to_text(&self, value: &Value) -> Result<String, ConversionError>;

    fn from_text(&self, text: &str, kind: ValueKind) -> Result<Value, ConversionError>;
}

/// Renders integers with a fixed prefix and zero padding, e.g. `S08` or `E01`.
///
/// Parsing accepts the prefix case-insensitively and also accepts bare digits.
#[derive(Debug, Clone)]
pub struct NumberConverter {
    prefix: String,
    width: usize,
}

impl NumberConverter {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
        }
    }
}

impl Converter for NumberConverter {
    fn to_text(&self, value: &Value) -> Result<String, ConversionError> {
        let width = self.width;
        match value {
            Value::Number(n) => Ok(format!("{}{:0width$}", self.prefix, n)),
            Value::Year(y) => Ok(format!("{}{:0width$}", self.prefix, y)),
            other => Err(ConversionError::new(other.to_string(), "not an integer")),
        }
    }

    fn from_text(&self, text: &str, kind: ValueKind) -> Result<Value, ConversionError> {
        let text = text.trim();
        let digits = match text.get(..self.prefix.len()) {
            Some(head) if !self.prefix.is_empty() && head.eq_ignore_ascii_case(&self.prefix) => {
                &text[self.prefix.len()..]
            }
            _ => text,
        };
        match kind {
            ValueKind::Year => Value::parse(digits, ValueKind::Year),
            _ => Value::parse(digits, ValueKind::Number),
        }
        .map_err(|e| ConversionError::new(text, e.reason))
    }
}

/// Renders dates with a chrono format string.
///
/// Parsing tries the configured format first, then falls back to
/// year-month-day separated by any of `.`, `-`, `_` or a space.
#[derive(Debug, Clone)]
pub struct DateConverter {
    format: String,
}

impl DateConverter {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Default for DateConverter {
    fn default() -> Self {
        Self::new("%Y.%m.%d")
    }
}

impl Converter for DateConverter {
    fn to_text(&self, value: &Value) -> Result<String, ConversionError> {
        match value {
            Value::Date(d) => Ok(d.format(&self.format).to_string()),
            other => Err(ConversionError::new(other.to_string(), "not a date")),
        }
    }

    fn from_text(&self, text: &str, _kind: ValueKind) -> Result<Value, ConversionError> {
        let text = text.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, &self.format) {
            return Ok(Value::Date(date));
        }
        let normalized: String = text
            .chars()
            .map(|c| if matches!(c, '.' | '_' | ' ') { '-' } else { c })
            .collect();
        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|e| ConversionError::new(text, e.to_string()))
    }
}

/// Text that appears with dots or underscores in place of spaces.
///
/// Rendering is the identity; parsing turns `The.Big_Bang.Theory` into
/// `The Big Bang Theory`. Text that already contains whitespace is only
/// collapsed, so `Mr. Robot` keeps its dot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneTextConverter;

impl Converter for SceneTextConverter {
    fn to_text(&self, value: &Value) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }

    fn from_text(&self, text: &str, _kind: ValueKind) -> Result<Value, ConversionError> {
        let words: Vec<&str> = if text.contains(char::is_whitespace) {
            text.split_whitespace().collect()
        } else {
            text.split(['.', '_']).filter(|w| !w.is_empty()).collect()
        };
        Ok(Value::Text(words.join(" ")))
    }
}

/// Tag lists joined by a separator.
///
/// Parsing splits on whitespace, underscores and dots, except a dot between
/// two digits, so `DD5.1` stays a single tag while `HDTV.x264` becomes two.
#[derive(Debug, Clone)]
pub struct TagsConverter {
    separator: String,
}

impl TagsConverter {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Default for TagsConverter {
    fn default() -> Self {
        Self::new(" ")
    }
}

/// Split a tag string on separators, keeping dots between digits.
pub fn split_tags(text: &str) -> Vec<Tag> {
    let chars: Vec<char> = text.chars().collect();
    let mut tags = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        let is_separator = match c {
            '.' => {
                let digit_before = i > 0 && chars[i - 1].is_ascii_digit();
                let digit_after = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
                !(digit_before && digit_after)
            }
            '_' => true,
            c => c.is_whitespace(),
        };
        if is_separator {
            if !current.is_empty() {
                tags.push(Tag::new(std::mem::take(&mut current)));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        tags.push(Tag::new(current));
    }
    tags
}

impl Converter for TagsConverter {
    fn to_text(&self, value: &Value) -> Result<String, ConversionError> {
        match value {
            Value::Tags(tags) => Ok(tags
                .iter()
                .map(Tag::as_str)
                .collect::<Vec<_>>()
                .join(&self.separator)),
            other => Ok(other.to_string()),
        }
    }

    fn from_text(&self, text: &str, _kind: ValueKind) -> Result<Value, ConversionError> {
        Ok(Value::Tags(split_tags(text)))
    }
}

/// Resolves converters by property, then by kind and supertypes.
///
/// Instances are immutable once built and shared through `Arc`.
#[derive(Clone, Default)]
pub struct ConverterService {
    by_property: HashMap<PropertyKey, Arc<dyn Converter>>,
    by_kind: HashMap<ValueKind, Arc<dyn Converter>>,
}

impl fmt::Debug for ConverterService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterService")
            .field("properties", &self.by_property.keys().collect::<Vec<_>>())
            .field("kinds", &self.by_kind.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ConverterService {
    pub fn builder() -> ConverterServiceBuilder {
        ConverterServiceBuilder::default()
    }

    fn resolve(&self, key: PropertyKey, kind: ValueKind) -> Option<&Arc<dyn Converter>> {
        if let Some(conv) = self.by_property.get(&key) {
            return Some(conv);
        }
        let mut current = Some(kind);
        while let Some(k) = current {
            if let Some(conv) = self.by_kind.get(&k) {
                return Some(conv);
            }
            current = k.supertype();
        }
        None
    }

    /// Render `value` as the text for property `key`.
    pub fn to_text(&self, key: PropertyKey, value: &Value) -> Result<String, ConversionError> {
        match self.resolve(key, value.kind()) {
            Some(conv) => conv.to_text(value).map_err(|e| e.for_key(key)),
            None => Ok(value.to_string()),
        }
    }

    /// Parse `text` as a value of `kind` for property `key`.
    pub fn from_text(
        &self,
        key: PropertyKey,
        text: &str,
        kind: ValueKind,
    ) -> Result<Value, ConversionError> {
        let value = match self.resolve(key, kind) {
            Some(conv) => conv.from_text(text, kind),
            None => Value::parse(text, kind),
        };
        value.map_err(|e| {
            trace!(%key, ?kind, text, reason = %e.reason, "conversion failed");
            e.for_key(key)
        })
    }

    pub fn parse_text(&self, key: PropertyKey, text: &str) -> Result<String, ConversionError> {
        match self.from_text(key, text, ValueKind::Text)? {
            Value::Text(s) => Ok(s),
            other => Ok(other.to_string()),
        }
    }

    pub fn parse_number(&self, key: PropertyKey, text: &str) -> Result<u32, ConversionError> {
        match self.from_text(key, text, ValueKind::Number)? {
            Value::Number(n) => Ok(n),
            other => Err(ConversionError::new(other.to_string(), "expected a number").for_key(key)),
        }
    }

    pub fn parse_year(&self, key: PropertyKey, text: &str) -> Result<i32, ConversionError> {
        match self.from_text(key, text, ValueKind::Year)? {
            Value::Year(y) => Ok(y),
            Value::Number(n) => i32::try_from(n)
                .map_err(|e| ConversionError::new(text, e.to_string()).for_key(key)),
            other => Err(ConversionError::new(other.to_string(), "expected a year").for_key(key)),
        }
    }

    pub fn parse_date(&self, key: PropertyKey, text: &str) -> Result<NaiveDate, ConversionError> {
        match self.from_text(key, text, ValueKind::Date)? {
            Value::Date(d) => Ok(d),
            other => Err(ConversionError::new(other.to_string(), "expected a date").for_key(key)),
        }
    }

    pub fn parse_tags(&self, key: PropertyKey, text: &str) -> Result<Vec<Tag>, ConversionError> {
        match self.from_text(key, text, ValueKind::Tags)? {
            Value::Tags(tags) => Ok(tags),
            other => Err(ConversionError::new(other.to_string(), "expected tags").for_key(key)),
        }
    }

    pub fn parse_group(&self, key: PropertyKey, text: &str) -> Result<Group, ConversionError> {
        match self.from_text(key, text, ValueKind::Group)? {
            Value::Group(g) => Ok(g),
            Value::Text(s) => Ok(Group::new(s)),
            other => Err(ConversionError::new(other.to_string(), "expected a group").for_key(key)),
        }
    }
}

/// Builder for [`ConverterService`].
#[derive(Default)]
pub struct ConverterServiceBuilder {
    service: ConverterService,
}

impl ConverterServiceBuilder {
    /// Override conversion for one property.
    pub fn property(mut self, key: PropertyKey, converter: impl Converter + 'static) -> Self {
        self.service.by_property.insert(key, Arc::new(converter));
        self
    }

    /// Override conversion for every property of `kind` without a property override.
    pub fn kind(mut self, kind: ValueKind, converter: impl Converter + 'static) -> Self {
        self.service.by_kind.insert(kind, Arc::new(converter));
        self
    }

    pub fn build(self) -> ConverterService {
        self.service
    }
}
