//! Property keys and the decoded property map.
//!
//! A [`PropertyKey`] names one field of one entity shape (for example
//! `episode.numberInSeason`). Keys are the shared vocabulary between the
//! naming side, which appends values under a key, and the parsing side,
//! which captures strings under a key and maps them back onto entities.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Identifier of a named field of a domain entity.
///
/// Equality, ordering and hashing use both the owning entity shape and the
/// field name. Keys are created once as constants in the per-entity modules
/// below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyKey {
    entity: &'static str,
    field: &'static str,
}

impl PropertyKey {
    /// Create a key for `field` of `entity`.
    pub const fn new(entity: &'static str, field: &'static str) -> Self {
        Self { entity, field }
    }

    /// The owning entity shape, e.g. `"episode"`.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// The field name, e.g. `"numberInSeason"`.
    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.field)
    }
}

impl Serialize for PropertyKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub mod series {
    use super::PropertyKey;

    pub const NAME: PropertyKey = PropertyKey::new("series", "name");
    pub const YEAR: PropertyKey = PropertyKey::new("series", "year");
}

pub mod season {
    use super::PropertyKey;

    pub const NUMBER: PropertyKey = PropertyKey::new("season", "number");
    pub const TITLE: PropertyKey = PropertyKey::new("season", "title");
}

pub mod episode {
    use super::PropertyKey;

    pub const NUMBER_IN_SEASON: PropertyKey = PropertyKey::new("episode", "numberInSeason");
    pub const NUMBER_IN_SERIES: PropertyKey = PropertyKey::new("episode", "numberInSeries");
    pub const DATE: PropertyKey = PropertyKey::new("episode", "date");
    pub const TITLE: PropertyKey = PropertyKey::new("episode", "title");
    /// A complete, independently rendered episode name.
    pub const NAME: PropertyKey = PropertyKey::new("episode", "name");
}

pub mod movie {
    use super::PropertyKey;

    pub const NAME: PropertyKey = PropertyKey::new("movie", "name");
    pub const YEAR: PropertyKey = PropertyKey::new("movie", "year");
}

pub mod release {
    use super::PropertyKey;

    pub const NAME: PropertyKey = PropertyKey::new("release", "name");
    pub const MEDIA: PropertyKey = PropertyKey::new("release", "media");
    pub const TAGS: PropertyKey = PropertyKey::new("release", "tags");
    pub const GROUP: PropertyKey = PropertyKey::new("release", "group");
}

pub mod subtitle {
    use super::PropertyKey;

    pub const NAME: PropertyKey = PropertyKey::new("subtitle", "name");
    pub const LANGUAGE: PropertyKey = PropertyKey::new("subtitle", "language");
    pub const TAGS: PropertyKey = PropertyKey::new("subtitle", "tags");
    pub const GROUP: PropertyKey = PropertyKey::new("subtitle", "group");
}

/// Decoded strings keyed by property.
///
/// Keys are unique. Assigning a key that already holds a value appends the
/// new text separated by a single space, so one semantic field can be fed
/// from several capture groups of the same pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyMap {
    entries: BTreeMap<PropertyKey, String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, concatenating with any existing value.
    pub fn insert(&mut self, key: PropertyKey, value: impl Into<String>) {
        let value = value.into();
        match self.entries.get_mut(&key) {
            Some(existing) if !existing.is_empty() => {
                if !value.is_empty() {
                    existing.push(' ');
                    existing.push_str(&value);
                }
            }
            Some(existing) => *existing = value,
            None => {
                self.entries.insert(key, value);
            }
        }
    }

    /// Insert `value` under `key`, replacing any existing value.
    pub fn replace(&mut self, key: PropertyKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: PropertyKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but treats blank values as absent.
    pub fn get_non_blank(&self, key: PropertyKey) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn contains(&self, key: PropertyKey) -> bool {
        self.get_non_blank(key).is_some()
    }

    pub fn remove(&mut self, key: PropertyKey) -> Option<String> {
        self.entries.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for PropertyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value:?}")?;
        }
        f.write_str("}")
    }
}

impl FromIterator<(PropertyKey, String)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (PropertyKey, String)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_by_entity_and_field() {
        assert_eq!(series::NAME, PropertyKey::new("series", "name"));
        assert_ne!(series::NAME, movie::NAME);
        assert_eq!(episode::NUMBER_IN_SEASON.to_string(), "episode.numberInSeason");
    }

    #[test]
    fn insert_concatenates_repeated_keys() {
        let mut map = PropertyMap::new();
        map.insert(release::TAGS, "PROPER");
        map.insert(release::TAGS, "720p.HDTV");
        assert_eq!(map.get(release::TAGS), Some("PROPER 720p.HDTV"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn insert_skips_empty_fragments() {
        let mut map = PropertyMap::new();
        map.insert(release::TAGS, "");
        map.insert(release::TAGS, "HDTV");
        map.insert(release::TAGS, "");
        assert_eq!(map.get(release::TAGS), Some("HDTV"));
    }

    #[test]
    fn replace_overwrites() {
        let mut map = PropertyMap::new();
        map.insert(episode::NUMBER_IN_SEASON, "E01-E03");
        map.replace(episode::NUMBER_IN_SEASON, "2");
        assert_eq!(map.get(episode::NUMBER_IN_SEASON), Some("2"));
    }

    #[test]
    fn blank_values_are_not_contained() {
        let mut map = PropertyMap::new();
        map.insert(episode::TITLE, "  ");
        assert!(!map.contains(episode::TITLE));
        assert_eq!(map.get(episode::TITLE), Some("  "));
    }

    #[test]
    fn display_lists_entries() {
        let map: PropertyMap = [(series::NAME, "Psych".to_string())].into_iter().collect();
        assert_eq!(map.to_string(), "{series.name=\"Psych\"}");
    }
}
