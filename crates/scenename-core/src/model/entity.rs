//! Sum types over the entity shapes the codec understands.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::episode::Episode;
use super::movie::Movie;
use super::release::{Group, Release, SubtitleRelease, Tag};
use super::series::{Season, Series};

/// A media item a release can contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Media {
    Series(Series),
    Season(Season),
    Episode(Episode),
    Movie(Movie),
}

impl Media {
    pub fn as_episode(&self) -> Option<&Episode> {
        match self {
            Media::Episode(ep) => Some(ep),
            _ => None,
        }
    }
}

impl From<Series> for Media {
    fn from(value: Series) -> Self {
        Media::Series(value)
    }
}

impl From<Season> for Media {
    fn from(value: Season) -> Self {
        Media::Season(value)
    }
}

impl From<Episode> for Media {
    fn from(value: Episode) -> Self {
        Media::Episode(value)
    }
}

impl From<Movie> for Media {
    fn from(value: Movie) -> Self {
        Media::Movie(value)
    }
}

/// Discriminant of [`Entity`], used to select namers and parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Series,
    Season,
    Episode,
    Movie,
    Release,
    SubtitleRelease,
    Tag,
    Group,
    List,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Series => "series",
            EntityKind::Season => "season",
            EntityKind::Episode => "episode",
            EntityKind::Movie => "movie",
            EntityKind::Release => "release",
            EntityKind::SubtitleRelease => "subtitle release",
            EntityKind::Tag => "tag",
            EntityKind::Group => "group",
            EntityKind::List => "list",
        };
        f.write_str(name)
    }
}

/// Anything that can be named or produced by parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Entity {
    Series(Series),
    Season(Season),
    Episode(Episode),
    Movie(Movie),
    Release(Release),
    SubtitleRelease(SubtitleRelease),
    Tag(Tag),
    Group(Group),
    List { items: Vec<Entity> },
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Series(_) => EntityKind::Series,
            Entity::Season(_) => EntityKind::Season,
            Entity::Episode(_) => EntityKind::Episode,
            Entity::Movie(_) => EntityKind::Movie,
            Entity::Release(_) => EntityKind::Release,
            Entity::SubtitleRelease(_) => EntityKind::SubtitleRelease,
            Entity::Tag(_) => EntityKind::Tag,
            Entity::Group(_) => EntityKind::Group,
            Entity::List { .. } => EntityKind::List,
        }
    }

    pub fn list(items: impl IntoIterator<Item = Entity>) -> Self {
        Entity::List {
            items: items.into_iter().collect(),
        }
    }

    /// The episodes of a list made up exclusively of episodes.
    ///
    /// Returns `None` for any other entity, including an empty list.
    pub fn as_episode_list(&self) -> Option<Vec<&Episode>> {
        match self {
            Entity::List { items } if !items.is_empty() => items
                .iter()
                .map(|item| match item {
                    Entity::Episode(ep) => Some(ep),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

impl From<Media> for Entity {
    fn from(media: Media) -> Self {
        match media {
            Media::Series(v) => Entity::Series(v),
            Media::Season(v) => Entity::Season(v),
            Media::Episode(v) => Entity::Episode(v),
            Media::Movie(v) => Entity::Movie(v),
        }
    }
}

/// A concrete entity shape that can be viewed inside an [`Entity`].
pub trait EntityType: Sized {
    const KIND: EntityKind;

    fn from_ref(entity: &Entity) -> Option<&Self>;

    fn from_entity(entity: Entity) -> Option<Self>;
}

macro_rules! entity_from {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Entity {
                fn from(value: $ty) -> Self {
                    Entity::$ty(value)
                }
            }

            impl EntityType for $ty {
                const KIND: EntityKind = EntityKind::$ty;

                fn from_ref(entity: &Entity) -> Option<&Self> {
                    match entity {
                        Entity::$ty(value) => Some(value),
                        _ => None,
                    }
                }

                fn from_entity(entity: Entity) -> Option<Self> {
                    match entity {
                        Entity::$ty(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

entity_from!(Series, Season, Episode, Movie, Release, SubtitleRelease, Tag, Group);

impl From<Vec<Episode>> for Entity {
    fn from(episodes: Vec<Episode>) -> Self {
        Entity::list(episodes.into_iter().map(Entity::Episode))
    }
}
