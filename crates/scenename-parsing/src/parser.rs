//! Mapping parsers: ordered pattern matchers feeding one mapper.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use scenename_core::{
    Entity, EntityKind, EntityType, Episode, MappingError, Movie, PropertyMap, Release, Result,
    Season, Series, SubtitleRelease,
};

use crate::mapper::Mapper;
use crate::matcher::PatternMatcher;

/// An entity shape a parser can produce.
pub trait Parsable: Sized + Send + Sync + 'static {
    /// Kind under which parsers producing this shape are registered.
    const KIND: EntityKind;

    fn into_entity(self) -> Entity;

    fn from_entity(entity: Entity) -> Option<Self>;
}

macro_rules! parsable {
    ($($ty:ident),*) => {
        $(
            impl Parsable for $ty {
                const KIND: EntityKind = <$ty as EntityType>::KIND;

                fn into_entity(self) -> Entity {
                    Entity::from(self)
                }

                fn from_entity(entity: Entity) -> Option<Self> {
                    <$ty as EntityType>::from_entity(entity)
                }
            }
        )*
    };
}

parsable!(Series, Season, Episode, Movie, Release, SubtitleRelease);

/// Episodes parsed from one name, e.g. `Psych.S08E01-E03`.
///
/// A single episode converts to [`Entity::Episode`], several to a list.
impl Parsable for Vec<Episode> {
    const KIND: EntityKind = EntityKind::Episode;

    fn into_entity(mut self) -> Entity {
        if self.len() == 1 {
            if let Some(episode) = self.pop() {
                return Entity::Episode(episode);
            }
        }
        Entity::from(self)
    }

    fn from_entity(entity: Entity) -> Option<Self> {
        match entity {
            Entity::Episode(episode) => Some(vec![episode]),
            Entity::List { items } => items
                .into_iter()
                .map(|item| match item {
                    Entity::Episode(episode) => Some(episode),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

/// Parses text into an entity of one kind.
///
/// `Ok(None)` means no pattern matched: callers move on to the next parser.
/// An error means a pattern matched but the entity could not be built.
pub trait Parser: Send + Sync {
    fn kind(&self) -> EntityKind;

    fn try_parse(&self, text: &str) -> Result<Option<Entity>>;
}

/// Tries its pattern matchers in order and maps the first match.
///
/// Matchers can be added while other threads parse; a parse in progress
/// keeps using the list it started with.
pub struct MappingParser<T> {
    name: String,
    matchers: RwLock<Arc<Vec<Arc<PatternMatcher>>>>,
    mapper: Arc<dyn Mapper<T>>,
}

impl<T> fmt::Debug for MappingParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingParser")
            .field("name", &self.name)
            .field("matchers", &self.matchers.read().len())
            .finish()
    }
}

impl<T> MappingParser<T> {
    pub fn new(name: impl Into<String>, mapper: Arc<dyn Mapper<T>>) -> Self {
        Self {
            name: name.into(),
            matchers: RwLock::new(Arc::new(Vec::new())),
            mapper,
        }
    }

    /// Add matchers in order.
    pub fn with_matchers(self, matchers: impl IntoIterator<Item = PatternMatcher>) -> Self {
        for matcher in matchers {
            self.add_matcher(matcher);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a matcher; it is tried after all existing ones.
    pub fn add_matcher(&self, matcher: PatternMatcher) {
        let mut guard = self.matchers.write();
        let mut next = Vec::clone(&guard);
        debug!(parser = %self.name, pattern = matcher.source(), "matcher added");
        next.push(Arc::new(matcher));
        *guard = Arc::new(next);
    }

    /// Snapshot of the current matchers, in order.
    pub fn matchers(&self) -> Arc<Vec<Arc<PatternMatcher>>> {
        Arc::clone(&self.matchers.read())
    }

    /// The properties captured by the first matching matcher.
    pub fn match_properties(&self, text: &str) -> Option<PropertyMap> {
        let matchers = self.matchers();
        matchers.iter().enumerate().find_map(|(index, matcher)| {
            trace!(parser = %self.name, index, "trying matcher");
            matcher.matches(text).filter(|props| !props.is_empty())
        })
    }

    /// Match `text` and map the captured properties.
    pub fn parse(&self, text: &str) -> std::result::Result<Option<T>, MappingError> {
        let Some(properties) = self.match_properties(text) else {
            return Ok(None);
        };
        debug!(parser = %self.name, %properties, "matched");
        self.mapper.map(&properties).map(Some)
    }
}

impl<T: Parsable> Parser for MappingParser<T> {
    fn kind(&self) -> EntityKind {
        T::KIND
    }

    fn try_parse(&self, text: &str) -> Result<Option<Entity>> {
        Ok(self.parse(text)?.map(Parsable::into_entity))
    }
}

#[cfg(test)]
mod tests {
    use scenename_core::convert::{NumberConverter, SceneTextConverter};
    use scenename_core::property::{episode, season, series};
    use scenename_core::ConverterService;

    use super::*;
    use crate::mapper::{MultiEpisodeMapper, SeriesMapper};

    fn converters() -> Arc<ConverterService> {
        Arc::new(
            ConverterService::builder()
                .property(series::NAME, SceneTextConverter)
                .property(season::NUMBER, NumberConverter::new("S", 2))
                .property(episode::NUMBER_IN_SEASON, NumberConverter::new("E", 2))
                .build(),
        )
    }

    fn episode_parser() -> MappingParser<Vec<Episode>> {
        let mapper = Arc::new(MultiEpisodeMapper::new(converters()));
        MappingParser::<Vec<Episode>>::new("episode", mapper)
            .with_matchers([PatternMatcher::with_keys(
                r"(.+?)\.S(\d+)(E\d+(?:[-+]E\d+)*)",
                &[series::NAME, season::NUMBER, episode::NUMBER_IN_SEASON],
            )
            .unwrap()])
    }

    #[test]
    fn no_match_is_not_an_error() {
        let parser = episode_parser();
        assert_eq!(parser.parse("not a release").unwrap(), None);
        assert_eq!(parser.parse("   ").unwrap(), None);
        assert!(parser.try_parse("").unwrap().is_none());
    }

    #[test]
    fn first_matcher_wins() {
        let mapper: Arc<dyn Mapper<Series>> = Arc::new(SeriesMapper::new(converters()));
        let parser = MappingParser::new("series", mapper).with_matchers([
            PatternMatcher::with_keys(r"(.+)\.US", &[series::NAME]).unwrap(),
            PatternMatcher::with_keys(r"(.+)", &[series::NAME]).unwrap(),
        ]);
        let series = parser.parse("The.Office.US").unwrap().unwrap();
        assert_eq!(series.name, "The Office");
        assert_eq!(parser.matchers().len(), 2);
    }

    #[test]
    fn multi_episode_becomes_list_entity() {
        let parser = episode_parser();
        let entity = parser.try_parse("Psych.S08E01-E03").unwrap().unwrap();
        let episodes = entity.as_episode_list().unwrap();
        assert_eq!(episodes.len(), 3);
        assert_eq!(episodes[2].number_in_season, Some(3));

        let entity = parser.try_parse("Psych.S08E01").unwrap().unwrap();
        assert_eq!(entity.kind(), EntityKind::Episode);
    }

    #[test]
    fn mapping_errors_propagate() {
        let parser = episode_parser();
        let err = parser.try_parse("Psych.S08E99999999999").unwrap_err();
        assert!(matches!(err, scenename_core::Error::Mapping(_)));
    }

    #[test]
    fn matchers_added_later_are_used() {
        let parser = episode_parser();
        assert_eq!(parser.parse("Psych 8x01").unwrap(), None);
        parser.add_matcher(
            PatternMatcher::with_keys(
                r"(.+?) (\d+)x(\d+)",
                &[series::NAME, season::NUMBER, episode::NUMBER_IN_SEASON],
            )
            .unwrap(),
        );
        let episodes = parser.parse("Psych 8x01").unwrap().unwrap();
        assert_eq!(episodes, vec![Episode::seasoned(Series::new("Psych"), 8, 1)]);
    }

    #[test]
    fn episode_vec_round_trips_through_entity() {
        let eps = vec![
            Episode::seasoned(Series::new("Psych"), 8, 1),
            Episode::seasoned(Series::new("Psych"), 8, 2),
        ];
        let entity = eps.clone().into_entity();
        assert_eq!(<Vec<Episode> as Parsable>::from_entity(entity), Some(eps));
    }
}
