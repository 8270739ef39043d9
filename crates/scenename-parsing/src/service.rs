//! Parsing services: dispatch of input text across parsers.
//!
//! [`TypedParsingService`] tries its registered parsers in registration
//! order and returns the first entity produced. [`MultiParsingService`]
//! does the same across whole services, which is how a strict grammar is
//! chained with a looser fallback.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, trace};

use scenename_core::{Entity, EntityKind, Error, Result};

use crate::parser::{MappingParser, Parsable, Parser};

/// Parses text into entities.
pub trait ParsingService: Send + Sync {
    /// Parse `text` with any parser, or `Ok(None)` if none matches.
    fn try_parse(&self, text: &str) -> Result<Option<Entity>>;

    /// Parse `text` with the parsers producing `kind` only.
    fn try_parse_kind(&self, text: &str, kind: EntityKind) -> Result<Option<Entity>>;

    /// Parse `text`, failing with [`Error::NoMatch`] if nothing matches.
    fn parse(&self, text: &str) -> Result<Entity> {
        if text.trim().is_empty() {
            return Err(Error::no_match(text));
        }
        self.try_parse(text)?.ok_or_else(|| Error::no_match(text))
    }

    /// Parse `text` as `kind`, failing with [`Error::NoMatch`] if nothing matches.
    fn parse_kind(&self, text: &str, kind: EntityKind) -> Result<Entity> {
        if text.trim().is_empty() {
            return Err(Error::no_match(text));
        }
        self.try_parse_kind(text, kind)?
            .ok_or_else(|| Error::no_match(text))
    }
}

/// Typed parsing on top of any [`ParsingService`].
pub trait ParsingServiceExt: ParsingService {
    /// Parse `text` into a `T`.
    ///
    /// A match of the right kind but the wrong shape, such as several
    /// episodes when one was asked for, counts as no match.
    fn parse_as<T: Parsable>(&self, text: &str) -> Result<T> {
        let entity = self.parse_kind(text, T::KIND)?;
        T::from_entity(entity).ok_or_else(|| Error::no_match(text))
    }
}

impl<S: ParsingService + ?Sized> ParsingServiceExt for S {}

/// Handle returned by [`TypedParsingService::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParserId(u64);

#[derive(Clone)]
struct Registration {
    id: ParserId,
    parser: Arc<dyn Parser>,
}

/// Tries registered parsers in order; the first match wins.
///
/// A parser that matches but fails to map stops the search: the error is
/// returned rather than hidden by a later parser.
pub struct TypedParsingService {
    entries: RwLock<Arc<Vec<Registration>>>,
    next_id: AtomicU64,
}

impl fmt::Debug for TypedParsingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedParsingService")
            .field("parsers", &self.len())
            .finish()
    }
}

impl Default for TypedParsingService {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedParsingService {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Append a parser; it is tried after all existing ones.
    pub fn register(&self, parser: Arc<dyn Parser>) -> ParserId {
        let id = ParserId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(kind = %parser.kind(), ?id, "registering parser");
        let mut entries = self.entries.write();
        let mut updated = Vec::clone(&entries);
        updated.push(Registration { id, parser });
        *entries = Arc::new(updated);
        id
    }

    pub fn register_parser<T: Parsable>(&self, parser: Arc<MappingParser<T>>) -> ParserId {
        self.register(parser)
    }

    /// Remove a parser. Returns whether it was registered.
    pub fn unregister(&self, id: ParserId) -> bool {
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
        debug!(?id, "unregistered parser");
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

    fn first_match(&self, text: &str, kind: Option<EntityKind>) -> Result<Option<Entity>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        for entry in self.snapshot().iter() {
            if kind.is_some_and(|kind| entry.parser.kind() != kind) {
                continue;
            }
            trace!(kind = %entry.parser.kind(), "trying parser");
            if let Some(entity) = entry.parser.try_parse(text)? {
                return Ok(Some(entity));
            }
        }
        Ok(None)
    }
}

impl ParsingService for TypedParsingService {
    fn try_parse(&self, text: &str) -> Result<Option<Entity>> {
        self.first_match(text, None)
    }

    fn try_parse_kind(&self, text: &str, kind: EntityKind) -> Result<Option<Entity>> {
        self.first_match(text, Some(kind))
    }
}

/// Tries several services in order and returns the first result.
#[derive(Default)]
pub struct MultiParsingService {
    services: Vec<Arc<dyn ParsingService>>,
}

impl MultiParsingService {
    pub fn new(services: Vec<Arc<dyn ParsingService>>) -> Self {
        Self { services }
    }

    pub fn push(&mut self, service: Arc<dyn ParsingService>) {
        self.services.push(service);
    }
}

impl ParsingService for MultiParsingService {
    fn try_parse(&self, text: &str) -> Result<Option<Entity>> {
        for service in &self.services {
            if let Some(entity) = service.try_parse(text)? {
                return Ok(Some(entity));
            }
        }
        Ok(None)
    }

    fn try_parse_kind(&self, text: &str, kind: EntityKind) -> Result<Option<Entity>> {
        for service in &self.services {
            if let Some(entity) = service.try_parse_kind(text, kind)? {
                return Ok(Some(entity));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use scenename_core::convert::{NumberConverter, SceneTextConverter};
    use scenename_core::property::{episode, movie, season, series};
    use scenename_core::{ConverterService, Episode, Movie, Series};

    use super::*;
    use crate::mapper::{Mapper, MovieMapper, MultiEpisodeMapper, SeriesMapper};
    use crate::matcher::PatternMatcher;

    fn converters() -> Arc<ConverterService> {
        Arc::new(
            ConverterService::builder()
                .property(series::NAME, SceneTextConverter)
                .property(movie::NAME, SceneTextConverter)
                .property(season::NUMBER, NumberConverter::new("S", 2))
                .property(episode::NUMBER_IN_SEASON, NumberConverter::new("E", 2))
                .build(),
        )
    }

    fn episode_parser() -> Arc<MappingParser<Vec<Episode>>> {
        let mapper: Arc<dyn Mapper<Vec<Episode>>> = Arc::new(MultiEpisodeMapper::new(converters()));
        Arc::new(MappingParser::new("episode", mapper).with_matchers([
            PatternMatcher::with_keys(
                r"(.+?)\.S(\d+)(E\d+(?:-E\d+)?)",
                &[series::NAME, season::NUMBER, episode::NUMBER_IN_SEASON],
            )
            .unwrap(),
        ]))
    }

    fn movie_parser() -> Arc<MappingParser<Movie>> {
        let mapper: Arc<dyn Mapper<Movie>> = Arc::new(MovieMapper::new(converters()));
        Arc::new(MappingParser::new("movie", mapper).with_matchers([
            PatternMatcher::with_keys(r"(.+?)\.(\d{4})", &[movie::NAME, movie::YEAR]).unwrap(),
        ]))
    }

    fn series_parser() -> Arc<MappingParser<Series>> {
        let mapper: Arc<dyn Mapper<Series>> = Arc::new(SeriesMapper::new(converters()));
        Arc::new(
            MappingParser::new("series", mapper)
                .with_matchers([PatternMatcher::with_keys(r"(.+)", &[series::NAME]).unwrap()]),
        )
    }

    fn service() -> TypedParsingService {
        let service = TypedParsingService::new();
        service.register_parser(episode_parser());
        service.register_parser(movie_parser());
        service
    }

    #[test]
    fn blank_input_is_no_match() {
        let service = service();
        assert!(service.parse("").unwrap_err().is_no_match());
        assert!(service.parse("  ").unwrap_err().is_no_match());
        assert_eq!(service.try_parse("  ").unwrap(), None);
    }

    #[test]
    fn first_registered_parser_wins() {
        let service = service();
        let entity = service.parse("Psych.S08E01").unwrap();
        assert_eq!(entity.kind(), EntityKind::Episode);
        let entity = service.parse("Inception.2010").unwrap();
        assert_eq!(entity, Entity::from(Movie::new("Inception").with_year(2010)));
        assert!(service.parse("nothing here").unwrap_err().is_no_match());
    }

    #[test]
    fn parse_as_restricts_to_kind() {
        let service = service();
        let movie: Movie = service.parse_as("Inception.2010").unwrap();
        assert_eq!(movie.year, Some(2010));
        assert!(service.parse_as::<Episode>("Inception.2010").unwrap_err().is_no_match());

        let episodes: Vec<Episode> = service.parse_as("Psych.S08E01-E02").unwrap();
        assert_eq!(episodes.len(), 2);
        assert!(service.parse_as::<Episode>("Psych.S08E01-E02").unwrap_err().is_no_match());
    }

    #[test]
    fn mapping_failure_is_not_no_match() {
        let service = service();
        let err = service.parse("Psych.S08E99999999999").unwrap_err();
        assert!(matches!(err, Error::Mapping(_)));
    }

    #[test]
    fn unregister_removes_parser() {
        let service = TypedParsingService::new();
        let id = service.register_parser(movie_parser());
        assert_eq!(service.len(), 1);
        assert!(service.unregister(id));
        assert!(!service.unregister(id));
        assert!(service.is_empty());
        assert_eq!(service.try_parse("Inception.2010").unwrap(), None);
    }

    #[test]
    fn multi_service_falls_back() {
        let strict: Arc<dyn ParsingService> = Arc::new(service());
        let loose = TypedParsingService::new();
        loose.register_parser(series_parser());
        let multi = MultiParsingService::new(vec![strict, Arc::new(loose)]);

        let entity = multi.parse("Inception.2010").unwrap();
        assert_eq!(entity.kind(), EntityKind::Movie);
        let entity = multi.parse("The.Office").unwrap();
        assert_eq!(entity, Entity::from(Series::new("The Office")));
    }

    #[test]
    fn concurrent_registration_and_parsing() {
        let service = Arc::new(service());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    if i % 2 == 0 {
                        service.register_parser(series_parser());
                    }
                    service.parse("Psych.S08E01").map(|e| e.kind())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), EntityKind::Episode);
        }
        assert_eq!(service.len(), 4);
    }
}
