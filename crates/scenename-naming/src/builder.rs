//! Incremental name construction.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use scenename_core::{ConverterService, PropertyKey, Result, Value};

use crate::format::Formatter;
use crate::separator::{SeparationType, SeparatorRules};

/// Converters, separator rules and an optional formatter shared by the
/// namers that produce one family of names.
#[derive(Clone)]
pub struct NameStyle {
    converters: Arc<ConverterService>,
    separators: Arc<SeparatorRules>,
    formatter: Option<Formatter>,
}

impl NameStyle {
    pub fn new(converters: Arc<ConverterService>, separators: Arc<SeparatorRules>) -> Self {
        Self {
            converters,
            separators,
            formatter: None,
        }
    }

    /// Apply `formatter` to every finished name of this style.
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// The same style with no formatter, for names embedded in other names.
    pub fn without_formatter(&self) -> Self {
        Self {
            converters: Arc::clone(&self.converters),
            separators: Arc::clone(&self.separators),
            formatter: None,
        }
    }

    pub fn converters(&self) -> &ConverterService {
        &self.converters
    }

    pub fn separators(&self) -> &SeparatorRules {
        &self.separators
    }
}

impl fmt::Debug for NameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameStyle")
            .field("default_separator", &self.separators.default_separator())
            .field("formatted", &self.formatter.is_some())
            .finish()
    }
}

/// Accumulates values into a name, inserting separators between them.
///
/// Appending a value that converts to empty text is a no-op: it neither
/// emits a separator nor becomes the previous key for the next append.
/// The formatter of the style runs once, in [`finish`](Self::finish).
pub struct NameBuilder<'a> {
    style: &'a NameStyle,
    name: String,
    previous: Option<PropertyKey>,
}

impl<'a> NameBuilder<'a> {
    pub fn new(style: &'a NameStyle) -> Self {
        Self {
            style,
            name: String::new(),
            previous: None,
        }
    }

    pub fn style(&self) -> &'a NameStyle {
        self.style
    }

    /// Key of the last non-empty value appended.
    pub fn previous_key(&self) -> Option<PropertyKey> {
        self.previous
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn append(&mut self, key: PropertyKey, value: impl Into<Value>) -> Result<&mut Self> {
        self.push(key, value.into(), None)
    }

    /// Append `value` if present.
    pub fn append_opt<V: Into<Value>>(
        &mut self,
        key: PropertyKey,
        value: Option<V>,
    ) -> Result<&mut Self> {
        match value {
            Some(value) => self.push(key, value.into(), None),
            None => Ok(self),
        }
    }

    /// Append `value`, resolving the separator with `separation_type`.
    pub fn append_with(
        &mut self,
        key: PropertyKey,
        value: impl Into<Value>,
        separation_type: SeparationType,
    ) -> Result<&mut Self> {
        self.push(key, value.into(), Some(separation_type))
    }

    fn push(
        &mut self,
        key: PropertyKey,
        value: Value,
        separation_type: Option<SeparationType>,
    ) -> Result<&mut Self> {
        let text = self.style.converters.to_text(key, &value)?;
        if text.trim().is_empty() {
            return Ok(self);
        }
        if let Some(previous) = self.previous {
            let separator = self.style.separators.resolve(previous, key, separation_type);
            trace!(%previous, next = %key, ?separation_type, separator, "resolved separator");
            self.name.push_str(separator);
        }
        self.name.push_str(&text);
        self.previous = Some(key);
        Ok(self)
    }

    /// The accumulated name, passed through the style's formatter.
    pub fn finish(self) -> String {
        match &self.style.formatter {
            Some(format) => format(&self.name),
            None => self.name,
        }
    }
}

impl fmt::Display for NameBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.style.formatter {
            Some(format) => f.write_str(&format(&self.name)),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::scene_formatter;
    use scenename_core::convert::NumberConverter;
    use scenename_core::property::{episode, release, season, series};

    fn style() -> NameStyle {
        let converters = ConverterService::builder()
            .property(season::NUMBER, NumberConverter::new("S", 2))
            .property(episode::NUMBER_IN_SEASON, NumberConverter::new("E", 2))
            .build();
        let separators = SeparatorRules::builder(" ")
            .pair(season::NUMBER, episode::NUMBER_IN_SEASON, "")
            .separation_type(SeparationType::RANGE, "-")
            .before(release::GROUP, "-")
            .build()
            .unwrap();
        NameStyle::new(Arc::new(converters), Arc::new(separators))
    }

    #[test]
    fn separators_follow_rules() {
        let style = style();
        let mut b = NameBuilder::new(&style);
        b.append(series::NAME, "Psych").unwrap();
        b.append(season::NUMBER, 8u32).unwrap();
        b.append(episode::NUMBER_IN_SEASON, 1u32).unwrap();
        b.append_with(episode::NUMBER_IN_SEASON, 3u32, SeparationType::RANGE)
            .unwrap();
        b.append(release::GROUP, "EXCELLENCE").unwrap();
        assert_eq!(b.finish(), "Psych S08E01-E03-EXCELLENCE");
    }

    #[test]
    fn empty_values_are_skipped_entirely() {
        let style = style();
        let mut b = NameBuilder::new(&style);
        b.append(series::NAME, "Psych").unwrap();
        b.append(season::NUMBER, 8u32).unwrap();
        b.append(episode::TITLE, "").unwrap();
        b.append_opt::<&str>(episode::TITLE, None).unwrap();
        assert_eq!(b.previous_key(), Some(season::NUMBER));
        b.append(episode::NUMBER_IN_SEASON, 1u32).unwrap();
        assert_eq!(b.to_string(), "Psych S08E01");
    }

    #[test]
    fn first_value_has_no_separator() {
        let style = style();
        let mut b = NameBuilder::new(&style);
        b.append(series::NAME, "").unwrap();
        assert!(b.is_empty());
        b.append(release::GROUP, "GRP").unwrap();
        assert_eq!(b.finish(), "GRP");
    }

    #[test]
    fn formatter_runs_once_at_the_end() {
        let style = style().with_formatter(scene_formatter());
        let mut b = NameBuilder::new(&style);
        b.append(series::NAME, "Grey's Anatomy").unwrap();
        b.append(season::NUMBER, 10u32).unwrap();
        assert_eq!(b.to_string(), "Greys.Anatomy.S10");
        assert_eq!(b.finish(), "Greys.Anatomy.S10");

        let plain = style.without_formatter();
        let mut b = NameBuilder::new(&plain);
        b.append(series::NAME, "Grey's Anatomy").unwrap();
        assert_eq!(b.finish(), "Grey's Anatomy");
    }

    #[test]
    fn conversion_failures_propagate() {
        let style = style();
        let mut b = NameBuilder::new(&style);
        let result = b.append(season::NUMBER, "eight").map(|_| ());
        assert!(matches!(result, Err(scenename_core::Error::Conversion(_))));
    }
}
