//! Mappers: turn a decoded [`PropertyMap`] into a typed entity.
//!
//! Leaf values go through the [`ConverterService`]; a failed conversion
//! becomes a [`MappingError`] carrying the full property map.

mod media;
mod release;

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use scenename_core::{
    ConverterService, EntityKind, Group, MappingError, PropertyKey, PropertyMap, Tag,
};

pub use media::{
    EpisodeMapper, MediaMapper, MovieMapper, MultiEpisodeMapper, SeasonMapper, SeriesMapper,
};
pub use release::{ReleaseMapper, SubtitleReleaseMapper};

/// Builds a value of `T` from matched properties.
pub trait Mapper<T>: Send + Sync {
    fn map(&self, properties: &PropertyMap) -> Result<T, MappingError>;
}

/// Typed, error-mapped access to the properties being mapped onto `target`.
pub(crate) struct Fields<'a> {
    properties: &'a PropertyMap,
    converters: &'a ConverterService,
    target: EntityKind,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(
        properties: &'a PropertyMap,
        converters: &'a ConverterService,
        target: EntityKind,
    ) -> Self {
        Self {
            properties,
            converters,
            target,
        }
    }

    pub(crate) fn has(&self, key: PropertyKey) -> bool {
        self.properties.contains(key)
    }

    pub(crate) fn missing(&self, key: PropertyKey) -> MappingError {
        MappingError::missing(self.target, self.properties, key)
    }

    pub(crate) fn error(&self, reason: impl Into<String>) -> MappingError {
        MappingError::new(self.target, self.properties, reason)
    }

    fn convert<T>(
        &self,
        key: PropertyKey,
        parse: impl FnOnce(&ConverterService, &str) -> Result<T, scenename_core::ConversionError>,
    ) -> Result<Option<T>, MappingError> {
        match self.properties.get_non_blank(key) {
            Some(text) => parse(self.converters, text)
                .map(Some)
                .map_err(|e| MappingError::conversion(self.target, self.properties, e)),
            None => Ok(None),
        }
    }

    pub(crate) fn text(&self, key: PropertyKey) -> Result<Option<String>, MappingError> {
        let text = self.convert(key, |c, t| c.parse_text(key, t))?;
        Ok(text.filter(|t| !t.is_empty()))
    }

    pub(crate) fn required_text(&self, key: PropertyKey) -> Result<String, MappingError> {
        self.text(key)?.ok_or_else(|| self.missing(key))
    }

    pub(crate) fn number(&self, key: PropertyKey) -> Result<Option<u32>, MappingError> {
        self.convert(key, |c, t| c.parse_number(key, t))
    }

    pub(crate) fn year(&self, key: PropertyKey) -> Result<Option<i32>, MappingError> {
        self.convert(key, |c, t| c.parse_year(key, t))
    }

    pub(crate) fn date(&self, key: PropertyKey) -> Result<Option<NaiveDate>, MappingError> {
        self.convert(key, |c, t| c.parse_date(key, t))
    }

    pub(crate) fn tags(&self, key: PropertyKey) -> Result<Vec<Tag>, MappingError> {
        Ok(self
            .convert(key, |c, t| c.parse_tags(key, t))?
            .unwrap_or_default())
    }

    pub(crate) fn group(&self, key: PropertyKey) -> Result<Option<Group>, MappingError> {
        self.convert(key, |c, t| c.parse_group(key, t))
    }
}

/// Longest span a single episode range may cover.
const MAX_RANGE: u32 = 999;

static EPISODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([-+]?)[Ee](\d+)").expect("episode token pattern is valid"));

/// Expand a multi-episode token such as `E01-E03`, `E01+E02` or `E01E02`.
///
/// Ranges are inclusive; a reversed range is swapped. Returns `None` for a
/// single episode number or for text that is not a well-formed
/// multi-episode token, in which case it should be converted as one value.
///
/// ```
/// use scenename_parsing::mapper::expand_episode_numbers;
///
/// assert_eq!(expand_episode_numbers("E01-E03"), Some(vec![1, 2, 3]));
/// assert_eq!(expand_episode_numbers("E05-E03"), Some(vec![3, 4, 5]));
/// assert_eq!(expand_episode_numbers("E01+E04"), Some(vec![1, 4]));
/// assert_eq!(expand_episode_numbers("E01"), None);
/// ```
pub fn expand_episode_numbers(text: &str) -> Option<Vec<u32>> {
    let text = text.trim();
    let mut numbers: Vec<u32> = Vec::new();
    let mut end = 0;
    let mut tokens = 0;
    for captures in EPISODE_TOKEN.captures_iter(text) {
        let token = captures.get(0)?;
        if token.start() != end {
            return None;
        }
        end = token.end();
        tokens += 1;
        let number: u32 = captures[2].parse().ok()?;
        let separator = &captures[1];
        if numbers.is_empty() && !separator.is_empty() {
            return None;
        }
        if separator == "-" {
            let start = numbers.pop()?;
            let (low, high) = if start <= number {
                (start, number)
            } else {
                (number, start)
            };
            if high - low > MAX_RANGE {
                return None;
            }
            numbers.extend(low..=high);
        } else {
            numbers.push(number);
        }
    }
    if end != text.len() || tokens < 2 {
        return None;
    }
    Some(numbers)
}

/// One property map per episode number in the value of `key`.
///
/// Every map is a copy of `properties` with only `key` replaced. A value
/// that does not expand yields `properties` unchanged.
pub fn expand_properties(properties: &PropertyMap, key: PropertyKey) -> Vec<PropertyMap> {
    let expanded = properties
        .get_non_blank(key)
        .and_then(expand_episode_numbers);
    match expanded {
        Some(numbers) => numbers
            .into_iter()
            .map(|number| {
                let mut single = properties.clone();
                single.replace(key, number.to_string());
                single
            })
            .collect(),
        None => vec![properties.clone()],
    }
}
