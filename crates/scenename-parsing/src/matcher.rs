//! Pattern matchers: anchored regexes whose capture groups map to property keys.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::trace;

use scenename_core::{ConfigError, PropertyKey, PropertyMap};

/// A compiled pattern plus the property key each capture group feeds.
///
/// The pattern must match the whole input. Group `0` refers to the whole
/// input. Several groups may feed the same key; their texts are joined with
/// a space in group order.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    source: String,
    regex: Regex,
    groups: BTreeMap<usize, PropertyKey>,
    predefined: PropertyMap,
}

impl PatternMatcher {
    /// Compile `source` and map the given capture groups.
    ///
    /// Fails if the pattern does not compile or a mapped group does not
    /// exist in it.
    pub fn new(
        source: impl Into<String>,
        groups: impl IntoIterator<Item = (usize, PropertyKey)>,
    ) -> Result<Self, ConfigError> {
        let source = source.into();
        let regex = compile(&format!("^(?:{source})$"), &source)?;
        let matcher = Self {
            source,
            regex,
            groups: BTreeMap::new(),
            predefined: PropertyMap::new(),
        };
        groups
            .into_iter()
            .try_fold(matcher, |m, (group, key)| m.map_group(group, key))
    }

    /// Compile `source`, mapping group `i + 1` to `keys[i]`.
    pub fn with_keys(source: impl Into<String>, keys: &[PropertyKey]) -> Result<Self, ConfigError> {
        Self::new(
            source,
            keys.iter().enumerate().map(|(i, key)| (i + 1, *key)),
        )
    }

    /// Map capture group `group` to `key`.
    pub fn map_group(mut self, group: usize, key: PropertyKey) -> Result<Self, ConfigError> {
        let available = self.group_count();
        if group > available {
            return Err(ConfigError::GroupOutOfRange {
                pattern: self.source,
                group,
                available,
            });
        }
        self.groups.insert(group, key);
        Ok(self)
    }

    /// Always report `value` under `key` when this matcher matches.
    pub fn with_predefined(mut self, key: PropertyKey, value: impl Into<String>) -> Self {
        self.predefined.insert(key, value);
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of capture groups, not counting group `0`.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    pub fn groups(&self) -> &BTreeMap<usize, PropertyKey> {
        &self.groups
    }

    /// Match `text` and collect the mapped groups.
    ///
    /// Returns `None` for blank input or if the pattern does not match.
    /// Groups that did not participate in the match are left out.
    pub fn matches(&self, text: &str) -> Option<PropertyMap> {
        if text.trim().is_empty() {
            return None;
        }
        let Some(captures) = self.regex.captures(text) else {
            trace!(pattern = %self.source, "no match");
            return None;
        };
        let mut properties = self.predefined.clone();
        for (&group, &key) in &self.groups {
            if let Some(m) = captures.get(group) {
                properties.insert(key, m.as_str());
            }
        }
        Some(properties)
    }

    /// Derive a matcher that wraps this one between `prefix` and `suffix`.
    ///
    /// Groups are renumbered: the groups of `prefix` come first, mapped in
    /// order to `prefix_keys`, then this matcher's groups in their original
    /// order, then the groups of `suffix`, mapped to `suffix_keys`. A group
    /// `0` mapping of this matcher is kept as a new group around the
    /// embedded pattern. Predefined values are carried over.
    pub fn extend(
        &self,
        prefix: &str,
        prefix_keys: &[PropertyKey],
        suffix: &str,
        suffix_keys: &[PropertyKey],
    ) -> Result<Self, ConfigError> {
        let prefix_count = count_groups(prefix, prefix_keys)?;
        count_groups(suffix, suffix_keys)?;

        let wraps_base = self.groups.contains_key(&0);
        let (base, base_count) = if wraps_base {
            (format!("({})", self.source), self.group_count() + 1)
        } else {
            (format!("(?:{})", self.source), self.group_count())
        };
        let base_shift = prefix_count + usize::from(wraps_base);

        let source = format!("(?:{prefix}){base}(?:{suffix})");
        let regex = compile(&format!("^(?:{source})$"), &source)?;

        let mut groups = BTreeMap::new();
        for (i, key) in prefix_keys.iter().enumerate() {
            groups.insert(i + 1, *key);
        }
        for (&group, &key) in &self.groups {
            let renumbered = if group == 0 {
                prefix_count + 1
            } else {
                group + base_shift
            };
            groups.insert(renumbered, key);
        }
        for (i, key) in suffix_keys.iter().enumerate() {
            groups.insert(prefix_count + base_count + i + 1, *key);
        }

        Ok(Self {
            source,
            regex,
            groups,
            predefined: self.predefined.clone(),
        })
    }
}

fn compile(pattern: &str, source: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: source.to_string(),
        reason: e.to_string(),
    })
}

/// Capture groups of a pattern fragment, checked against the keys mapped to them.
fn count_groups(fragment: &str, keys: &[PropertyKey]) -> Result<usize, ConfigError> {
    let count = compile(fragment, fragment)?.captures_len() - 1;
    if keys.len() > count {
        return Err(ConfigError::GroupOutOfRange {
            pattern: fragment.to_string(),
            group: keys.len(),
            available: count,
        });
    }
    Ok(count)
}
