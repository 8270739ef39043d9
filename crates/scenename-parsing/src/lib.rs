//! # scenename-parsing
//!
//! Decodes scene release names back into typed entities.
//!
//! Decoding runs in two steps. A [`PatternMatcher`] anchors a regular
//! expression on the whole input and binds its capture groups to property
//! keys. A [`Mapper`] then turns the captured [`PropertyMap`](scenename_core::PropertyMap)
//! into an entity, converting each value through the
//! [`ConverterService`](scenename_core::ConverterService). A
//! [`MappingParser`] pairs ordered matchers with one mapper, and a
//! [`TypedParsingService`] tries parsers until one matches.
//!
//! # Examples
//!
//! ```
//! use scenename_core::{Entity, Release, Series};
//! use scenename_parsing::{ParsingDefaults, ParsingService, ParsingServiceExt};
//!
//! let service = ParsingDefaults::shared().parsing_service();
//!
//! let release: Release = service.parse_as("Psych.S08E01.HDTV.x264-EXCELLENCE").unwrap();
//! assert_eq!(release.group.unwrap().as_str(), "EXCELLENCE");
//! assert_eq!(release.tags.len(), 2);
//!
//! let entity = service.parse("Psych S08E01-E03").unwrap();
//! assert_eq!(entity.as_episode_list().map(|eps| eps.len()), Some(3));
//!
//! let series = service.parse("Psych").unwrap();
//! assert_eq!(series, Entity::from(Series::new("Psych")));
//! ```

pub mod config;
pub mod defaults;
pub mod grammar;
pub mod mapper;
pub mod matcher;
pub mod parser;
pub mod service;
pub mod vocab;

pub use config::{ParsingConfig, ParsingConfigBuilder};
pub use defaults::{ParsingDefaults, default_converters, parse};
pub use grammar::{Grammar, MediaShape, ReleaseSuffix};
pub use mapper::{Mapper, expand_episode_numbers};
pub use matcher::PatternMatcher;
pub use parser::{MappingParser, Parsable, Parser};
pub use service::{
    MultiParsingService, ParserId, ParsingService, ParsingServiceExt, TypedParsingService,
};
pub use vocab::LanguageConverter;
