//! Separator rules of a name style.
//!
//! When a value is appended to a [`NameBuilder`](crate::NameBuilder) after
//! another one, the separator between them is resolved from the keys of the
//! two values and an optional [`SeparationType`]:
//!
//! 1. a pair rule for `(previous, next)` carrying the same separation type
//! 2. a pair rule for `(previous, next)` without a separation type
//! 3. a rule for the separation type alone
//! 4. a rule anchored before `next`
//! 5. a rule anchored after `previous`
//! 6. the default separator

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;

use scenename_core::{ConfigError, PropertyKey};

/// A named role of a separator, independent of the keys it sits between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeparationType(&'static str);

impl SeparationType {
    /// Between the first and last number of a consecutive run.
    pub const RANGE: SeparationType = SeparationType("range");
    /// Before an additional number that does not extend a run.
    pub const ADDITION: SeparationType = SeparationType("addition");
    /// Between independently named list items.
    pub const ITEM: SeparationType = SeparationType("item");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SeparationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One separator rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeparatorRule {
    Pair {
        previous: PropertyKey,
        next: PropertyKey,
        separation_type: Option<SeparationType>,
        separator: String,
    },
    Type {
        separation_type: SeparationType,
        separator: String,
    },
    Before {
        next: PropertyKey,
        separator: String,
    },
    After {
        previous: PropertyKey,
        separator: String,
    },
}

/// Immutable, resolved set of separator rules.
#[derive(Debug, Clone)]
pub struct SeparatorRules {
    default: String,
    pairs: HashMap<(PropertyKey, PropertyKey, Option<SeparationType>), String>,
    types: HashMap<SeparationType, String>,
    before: HashMap<PropertyKey, String>,
    after: HashMap<PropertyKey, String>,
}

impl SeparatorRules {
    /// Start building rules with the given default separator.
    pub fn builder(default: impl Into<String>) -> SeparatorRulesBuilder {
        SeparatorRulesBuilder {
            default: default.into(),
            rules: Vec::new(),
        }
    }

    /// Rules that always produce `default`.
    pub fn uniform(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            pairs: HashMap::new(),
            types: HashMap::new(),
            before: HashMap::new(),
            after: HashMap::new(),
        }
    }

    pub fn default_separator(&self) -> &str {
        &self.default
    }

    /// The separator to place between a value of `previous` and one of `next`.
    pub fn resolve(
        &self,
        previous: PropertyKey,
        next: PropertyKey,
        separation_type: Option<SeparationType>,
    ) -> &str {
        if separation_type.is_some() {
            if let Some(sep) = self.pairs.get(&(previous, next, separation_type)) {
                return sep;
            }
        }
        if let Some(sep) = self.pairs.get(&(previous, next, None)) {
            return sep;
        }
        if let Some(sep) = separation_type.and_then(|t| self.types.get(&t)) {
            return sep;
        }
        if let Some(sep) = self.before.get(&next) {
            return sep;
        }
        if let Some(sep) = self.after.get(&previous) {
            return sep;
        }
        &self.default
    }
}

/// Builder for [`SeparatorRules`].
#[derive(Debug, Clone)]
pub struct SeparatorRulesBuilder {
    default: String,
    rules: Vec<SeparatorRule>,
}

impl SeparatorRulesBuilder {
    pub fn rule(mut self, rule: SeparatorRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn pair(
        self,
        previous: PropertyKey,
        next: PropertyKey,
        separator: impl Into<String>,
    ) -> Self {
        self.rule(SeparatorRule::Pair {
            previous,
            next,
            separation_type: None,
            separator: separator.into(),
        })
    }

    pub fn typed_pair(
        self,
        previous: PropertyKey,
        next: PropertyKey,
        separation_type: SeparationType,
        separator: impl Into<String>,
    ) -> Self {
        self.rule(SeparatorRule::Pair {
            previous,
            next,
            separation_type: Some(separation_type),
            separator: separator.into(),
        })
    }

    pub fn separation_type(
        self,
        separation_type: SeparationType,
        separator: impl Into<String>,
    ) -> Self {
        self.rule(SeparatorRule::Type {
            separation_type,
            separator: separator.into(),
        })
    }

    pub fn before(self, next: PropertyKey, separator: impl Into<String>) -> Self {
        self.rule(SeparatorRule::Before {
            next,
            separator: separator.into(),
        })
    }

    pub fn after(self, previous: PropertyKey, separator: impl Into<String>) -> Self {
        self.rule(SeparatorRule::After {
            previous,
            separator: separator.into(),
        })
    }

    /// Resolve the rules.
    ///
    /// Repeating a rule with the same separator is allowed; repeating it with
    /// a different separator is a [`ConfigError::ConflictingSeparator`].
    pub fn build(self) -> Result<SeparatorRules, ConfigError> {
        let mut rules = SeparatorRules::uniform(self.default);
        for rule in self.rules {
            match rule {
                SeparatorRule::Pair {
                    previous,
                    next,
                    separation_type,
                    separator,
                } => {
                    let label = match separation_type {
                        Some(t) => format!("{previous} -> {next} ({t})"),
                        None => format!("{previous} -> {next}"),
                    };
                    insert_rule(
                        &mut rules.pairs,
                        (previous, next, separation_type),
                        separator,
                        label,
                    )?
                }
                SeparatorRule::Type {
                    separation_type,
                    separator,
                } => insert_rule(
                    &mut rules.types,
                    separation_type,
                    separator,
                    format!("type {separation_type}"),
                )?,
                SeparatorRule::Before { next, separator } => {
                    insert_rule(&mut rules.before, next, separator, format!("before {next}"))?
                }
                SeparatorRule::After {
                    previous,
                    separator,
                } => insert_rule(
                    &mut rules.after,
                    previous,
                    separator,
                    format!("after {previous}"),
                )?,
            }
        }
        Ok(rules)
    }
}

fn insert_rule<K: Eq + Hash>(
    map: &mut HashMap<K, String>,
    key: K,
    separator: String,
    label: String,
) -> Result<(), ConfigError> {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(separator);
            Ok(())
        }
        Entry::Occupied(slot) if *slot.get() == separator => Ok(()),
        Entry::Occupied(slot) => Err(ConfigError::ConflictingSeparator {
            rule: label,
            first: slot.get().clone(),
            second: separator,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenename_core::property::{episode, release, season, series};

    fn rules() -> SeparatorRules {
        SeparatorRules::builder(".")
            .pair(season::NUMBER, episode::NUMBER_IN_SEASON, "")
            .typed_pair(season::NUMBER, episode::NUMBER_IN_SEASON, SeparationType::RANGE, "~")
            .separation_type(SeparationType::RANGE, "-")
            .separation_type(SeparationType::ADDITION, "+")
            .before(release::GROUP, "-")
            .after(series::NAME, "_")
            .build()
            .unwrap()
    }

    #[test]
    fn typed_pair_wins_over_untyped_pair() {
        let rules = rules();
        assert_eq!(
            rules.resolve(season::NUMBER, episode::NUMBER_IN_SEASON, Some(SeparationType::RANGE)),
            "~"
        );
        assert_eq!(rules.resolve(season::NUMBER, episode::NUMBER_IN_SEASON, None), "");
        assert_eq!(
            rules.resolve(
                season::NUMBER,
                episode::NUMBER_IN_SEASON,
                Some(SeparationType::ADDITION)
            ),
            ""
        );
    }

    #[test]
    fn type_wins_over_anchored_rules() {
        let rules = rules();
        assert_eq!(
            rules.resolve(
                episode::NUMBER_IN_SEASON,
                episode::NUMBER_IN_SEASON,
                Some(SeparationType::RANGE)
            ),
            "-"
        );
        assert_eq!(
            rules.resolve(series::NAME, release::GROUP, Some(SeparationType::ADDITION)),
            "+"
        );
    }

    #[test]
    fn before_wins_over_after() {
        let rules = rules();
        assert_eq!(rules.resolve(series::NAME, release::GROUP, None), "-");
        assert_eq!(rules.resolve(series::NAME, season::NUMBER, None), "_");
        assert_eq!(rules.resolve(release::TAGS, season::NUMBER, None), ".");
    }

    #[test]
    fn pair_wins_over_anchored_rules_on_the_same_adjacency() {
        let rules = SeparatorRules::builder(".")
            .pair(series::NAME, release::GROUP, "~")
            .before(release::GROUP, "-")
            .after(series::NAME, "_")
            .build()
            .unwrap();
        assert_eq!(rules.resolve(series::NAME, release::GROUP, None), "~");
        assert_eq!(rules.resolve(release::TAGS, release::GROUP, None), "-");
        assert_eq!(rules.resolve(series::NAME, release::TAGS, None), "_");

        let rules = SeparatorRules::builder(".")
            .pair(series::NAME, season::NUMBER, "~")
            .after(series::NAME, "_")
            .build()
            .unwrap();
        assert_eq!(rules.resolve(series::NAME, season::NUMBER, None), "~");
        assert_eq!(rules.resolve(series::NAME, episode::TITLE, None), "_");
    }

    #[test]
    fn duplicate_rules_must_agree() {
        let ok = SeparatorRules::builder(" ")
            .before(release::GROUP, "-")
            .before(release::GROUP, "-")
            .build();
        assert!(ok.is_ok());

        let err = SeparatorRules::builder(" ")
            .before(release::GROUP, "-")
            .before(release::GROUP, "_")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingSeparator { .. }));
    }

    #[test]
    fn uniform_always_returns_default() {
        let rules = SeparatorRules::uniform(" ");
        assert_eq!(rules.default_separator(), " ");
        assert_eq!(rules.resolve(series::NAME, release::GROUP, Some(SeparationType::ITEM)), " ");
    }
}
