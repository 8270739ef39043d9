//! Naming services: dispatch of arbitrary entities to namers.
//!
//! [`ConditionalNamingService`] holds an ordered registration table of
//! `(selector, service)` pairs and uses the first entry whose selector
//! accepts the candidate. Registration order is observable behavior: more
//! specific selectors must be registered before more general ones.
//!
//! The table is copy-on-write behind a `parking_lot::RwLock`. Lookups clone
//! the current `Arc` snapshot and never see a partially applied change.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, trace};

use scenename_core::{Entity, EntityKind, EntityType, Error, Result};

use crate::format::Formatter;
use crate::namers::{MultiEpisodeNamer, Namer};
use crate::params::NamingParams;

/// Names entities.
pub trait NamingService: Send + Sync {
    /// Name `candidate`, or `Ok(None)` if no namer accepts it.
    fn try_name(&self, candidate: &Entity, params: &NamingParams) -> Result<Option<String>>;

    /// Name `candidate`, failing with [`Error::NoNamer`] if no namer accepts it.
    fn name(&self, candidate: &Entity, params: &NamingParams) -> Result<String> {
        self.try_name(candidate, params)?.ok_or(Error::NoNamer {
            kind: candidate.kind(),
        })
    }

    /// Name an optional candidate; absence names as the empty string.
    fn name_opt(&self, candidate: Option<&Entity>, params: &NamingParams) -> Result<String> {
        match candidate {
            Some(candidate) => self.name(candidate, params),
            None => Ok(String::new()),
        }
    }

    /// Name every item and join the non-empty names with `separator`.
    fn name_all(&self, items: &[Entity], separator: &str, params: &NamingParams) -> Result<String> {
        let mut joined = String::new();
        for item in items {
            let name = self.name(item, params)?;
            if name.is_empty() {
                continue;
            }
            if !joined.is_empty() {
                joined.push_str(separator);
            }
            joined.push_str(&name);
        }
        Ok(joined)
    }
}

/// Adapts a [`Namer`] of one entity shape to a [`NamingService`].
pub struct NamerService<T: EntityType + 'static> {
    namer: Arc<dyn Namer<T>>,
}

impl<T: EntityType + 'static> NamerService<T> {
    pub fn new(namer: Arc<dyn Namer<T>>) -> Self {
        Self { namer }
    }
}

impl<T: EntityType + 'static> NamingService for NamerService<T> {
    fn try_name(&self, candidate: &Entity, params: &NamingParams) -> Result<Option<String>> {
        match T::from_ref(candidate) {
            Some(value) => self.namer.name(value, params).map(Some),
            None => Ok(None),
        }
    }
}

/// Names lists made up only of episodes as one multi-episode name.
pub struct MultiEpisodeService {
    namer: Arc<MultiEpisodeNamer>,
}

impl MultiEpisodeService {
    pub fn new(namer: Arc<MultiEpisodeNamer>) -> Self {
        Self { namer }
    }
}

impl NamingService for MultiEpisodeService {
    fn try_name(&self, candidate: &Entity, params: &NamingParams) -> Result<Option<String>> {
        match candidate.as_episode_list() {
            Some(episodes) => self.namer.name_episodes(&episodes, params).map(Some),
            None => Ok(None),
        }
    }
}

/// Chooses the entries of a [`ConditionalNamingService`].
#[derive(Clone)]
pub enum Selector {
    /// Accepts entities of exactly this kind.
    Kind(EntityKind),
    /// Accepts entities for which the predicate holds.
    Predicate(Arc<dyn Fn(&Entity) -> bool + Send + Sync>),
}

impl Selector {
    pub fn kind(kind: EntityKind) -> Self {
        Selector::Kind(kind)
    }

    pub fn predicate(predicate: impl Fn(&Entity) -> bool + Send + Sync + 'static) -> Self {
        Selector::Predicate(Arc::new(predicate))
    }

    pub fn accepts(&self, candidate: &Entity) -> bool {
        match self {
            Selector::Kind(kind) => candidate.kind() == *kind,
            Selector::Predicate(predicate) => predicate(candidate),
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Selector::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Handle returned by [`ConditionalNamingService::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

#[derive(Clone)]
struct Registration {
    id: RegistrationId,
    selector: Selector,
    service: Arc<dyn NamingService>,
}

/// Dispatches to the first registered service whose selector accepts the
/// candidate.
///
/// A list that no entry accepts is named item by item, the names joined
/// with the list separator.
pub struct ConditionalNamingService {
    entries: RwLock<Arc<Vec<Registration>>>,
    next_id: AtomicU64,
    list_separator: String,
}

impl ConditionalNamingService {
    pub fn new(list_separator: impl Into<String>) -> Self {
        Self {
            entries: RwLock::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(0),
            list_separator: list_separator.into(),
        }
    }

    /// Append an entry to the end of the table.
    pub fn register(&self, selector: Selector, service: Arc<dyn NamingService>) -> RegistrationId {
        let id = RegistrationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(?selector, ?id, "registering naming service");
        let mut entries = self.entries.write();
        let mut updated = Vec::clone(&entries);
        updated.push(Registration {
            id,
            selector,
            service,
        });
        *entries = Arc::new(updated);
        id
    }

    /// Register a namer for entities of its own shape.
    pub fn register_namer<T: EntityType + 'static>(
        &self,
        namer: Arc<dyn Namer<T>>,
    ) -> RegistrationId {
        self.register(Selector::Kind(T::KIND), Arc::new(NamerService::new(namer)))
    }

    /// Remove an entry. Returns whether it was registered.
    pub fn unregister(&self, id: RegistrationId) -> bool {
        let mut entries = self.entries.write();
        if !entries.iter().any(|entry| entry.id == id) {
            return false;
        }
        let updated: Vec<Registration> = entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        *entries = Arc::new(updated);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn snapshot(&self) -> Arc<Vec<Registration>> {
        Arc::clone(&self.entries.read())
    }
}

impl NamingService for ConditionalNamingService {
    fn try_name(&self, candidate: &Entity, params: &NamingParams) -> Result<Option<String>> {
        let entries = self.snapshot();
        if let Some(entry) = entries.iter().find(|entry| entry.selector.accepts(candidate)) {
            trace!(kind = %candidate.kind(), selector = ?entry.selector, "naming");
            return entry.service.try_name(candidate, params);
        }
        if let Entity::List { items } = candidate {
            return self
                .name_all(items, &self.list_separator, params)
                .map(Some);
        }
        Ok(None)
    }
}

impl fmt::Debug for ConditionalNamingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.snapshot();
        f.debug_struct("ConditionalNamingService")
            .field(
                "selectors",
                &entries.iter().map(|e| &e.selector).collect::<Vec<_>>(),
            )
            .field("list_separator", &self.list_separator)
            .finish()
    }
}

/// Applies a formatter to every name produced by an inner service.
pub struct DecoratingNamingService {
    inner: Arc<dyn NamingService>,
    decorator: Formatter,
}

impl DecoratingNamingService {
    pub fn new(inner: Arc<dyn NamingService>, decorator: Formatter) -> Self {
        Self { inner, decorator }
    }
}

impl NamingService for DecoratingNamingService {
    fn try_name(&self, candidate: &Entity, params: &NamingParams) -> Result<Option<String>> {
        Ok(self
            .inner
            .try_name(candidate, params)?
            .map(|name| (self.decorator)(&name)))
    }
}

/// Tries several services in order and returns the first name produced.
#[derive(Default)]
pub struct DelegatingNamingService {
    services: Vec<Arc<dyn NamingService>>,
}

impl DelegatingNamingService {
    pub fn new(services: Vec<Arc<dyn NamingService>>) -> Self {
        Self { services }
    }

    pub fn push(mut self, service: Arc<dyn NamingService>) -> Self {
        self.services.push(service);
        self
    }
}

impl NamingService for DelegatingNamingService {
    fn try_name(&self, candidate: &Entity, params: &NamingParams) -> Result<Option<String>> {
        for service in &self.services {
            if let Some(name) = service.try_name(candidate, params)? {
                return Ok(Some(name));
            }
        }
        Ok(None)
    }
}

/// Returns the stored literal name of releases and subtitle releases.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralNamingService;

impl NamingService for LiteralNamingService {
    fn try_name(&self, candidate: &Entity, _params: &NamingParams) -> Result<Option<String>> {
        let name = match candidate {
            Entity::Release(release) => release.name.as_deref(),
            Entity::SubtitleRelease(subtitle) => subtitle.name.as_deref(),
            _ => None,
        };
        Ok(name.filter(|n| !n.trim().is_empty()).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use scenename_core::{Episode, Group, Movie, Release, Series, Tag};

    use super::*;
    use crate::format::matching_formatter;
    use crate::namers::testing::defaults;

    struct Fixed(&'static str);

    impl NamingService for Fixed {
        fn try_name(&self, _: &Entity, _: &NamingParams) -> Result<Option<String>> {
            Ok(Some(self.0.to_string()))
        }
    }

    #[test]
    fn first_matching_selector_wins() {
        let service = ConditionalNamingService::new(", ");
        service.register(Selector::kind(EntityKind::Movie), Arc::new(Fixed("kind")));
        service.register(Selector::predicate(|_| true), Arc::new(Fixed("any")));
        let params = NamingParams::new();
        assert_eq!(service.name(&Movie::new("Heat").into(), &params).unwrap(), "kind");
        assert_eq!(service.name(&Series::new("Psych").into(), &params).unwrap(), "any");
    }

    #[test]
    fn unknown_kind_is_no_namer() {
        let service = ConditionalNamingService::new(", ");
        let err = service
            .name(&Tag::new("HDTV").into(), &NamingParams::new())
            .unwrap_err();
        assert_eq!(err, Error::NoNamer { kind: EntityKind::Tag });
        assert_eq!(service.name_opt(None, &NamingParams::new()).unwrap(), "");
    }

    #[test]
    fn lists_fall_back_to_items() {
        let service = ConditionalNamingService::new(" | ");
        service.register(Selector::kind(EntityKind::Group), Arc::new(Fixed("G")));
        service.register(Selector::kind(EntityKind::Movie), Arc::new(Fixed("M")));
        let list = Entity::list([Group::new("a").into(), Movie::new("b").into()]);
        assert_eq!(service.name(&list, &NamingParams::new()).unwrap(), "G | M");
    }

    #[test]
    fn unregister_removes_entry() {
        let service = ConditionalNamingService::new(", ");
        let id = service.register(Selector::kind(EntityKind::Movie), Arc::new(Fixed("M")));
        assert_eq!(service.len(), 1);
        assert!(service.unregister(id));
        assert!(!service.unregister(id));
        assert!(service.is_empty());
        assert!(service
            .try_name(&Movie::new("Heat").into(), &NamingParams::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn decorator_applies_to_inner_result() {
        let inner = Arc::new(ConditionalNamingService::new(", "));
        inner.register(Selector::predicate(|_| true), Arc::new(Fixed("Grey's Anatomy")));
        let service = DecoratingNamingService::new(inner, matching_formatter());
        assert_eq!(
            service.name(&Movie::new("x").into(), &NamingParams::new()).unwrap(),
            "greys anatomy"
        );
    }

    #[test]
    fn delegating_prefers_literal_names() {
        let defaults = defaults();
        let service = DelegatingNamingService::default()
            .push(Arc::new(LiteralNamingService))
            .push(defaults.scene_naming_service());
        let params = NamingParams::new();
        let computed = Release::new(Episode::seasoned(Series::new("Psych"), 8, 1))
            .with_tags(["HDTV"])
            .with_group("GRP");
        let literal = computed.clone().with_name("Psych.S08E01.iNTERNAL.HDTV-GRP");
        assert_eq!(service.name(&computed.into(), &params).unwrap(), "Psych.S08E01.HDTV-GRP");
        assert_eq!(
            service.name(&literal.into(), &params).unwrap(),
            "Psych.S08E01.iNTERNAL.HDTV-GRP"
        );
    }

    #[test]
    fn registry_is_shared_across_threads() {
        let service = Arc::new(ConditionalNamingService::new(", "));
        service.register(Selector::kind(EntityKind::Movie), Arc::new(Fixed("M")));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let name = service.name(&Movie::new("x").into(), &NamingParams::new());
                        assert_eq!(name.unwrap(), "M");
                    }
                })
            })
            .collect();
        for _ in 0..50 {
            let id = service.register(Selector::kind(EntityKind::Series), Arc::new(Fixed("S")));
            service.unregister(id);
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
