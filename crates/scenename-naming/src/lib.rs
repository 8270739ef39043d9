//! # scenename-naming
//!
//! Builds canonical names for series, seasons, episodes, movies, releases
//! and subtitle releases.
//!
//! Names are assembled by a [`NameBuilder`]: namers append typed values
//! under property keys, the [`ConverterService`](scenename_core::ConverterService)
//! renders each value as text and the [`SeparatorRules`] decide what goes
//! between two adjacent values. A formatter such as [`format::scene_format`]
//! runs once on the finished name.
//!
//! # Examples
//!
//! ```
//! use scenename_core::{Episode, Entity, Release, Series};
//! use scenename_naming::{NamingDefaults, NamingParams, NamingService};
//!
//! let defaults = NamingDefaults::shared();
//! let service = defaults.naming_service();
//!
//! let episode = Episode::seasoned(Series::new("Psych"), 8, 1).with_title("Juliet Takes a Luvvah");
//! let name = service.name(&Entity::from(episode.clone()), &NamingParams::new()).unwrap();
//! assert_eq!(name, "Psych S08E01 Juliet Takes a Luvvah");
//!
//! let release = Release::new(episode).with_tags(["HDTV", "x264"]).with_group("EXCELLENCE");
//! let name = service.name(&Entity::from(release), &NamingParams::new()).unwrap();
//! assert_eq!(name, "Psych.S08E01.HDTV.x264-EXCELLENCE");
//! ```

pub mod builder;
pub mod config;
pub mod defaults;
pub mod format;
pub mod namers;
pub mod params;
pub mod separator;
pub mod service;

pub use builder::{NameBuilder, NameStyle};
pub use config::{NamingConfig, NamingConfigBuilder};
pub use defaults::{NamingDefaults, name};
pub use namers::Namer;
pub use params::{NamingParams, ParamValue};
pub use separator::{SeparationType, SeparatorRule, SeparatorRules};
pub use service::{
    ConditionalNamingService, DecoratingNamingService, DelegatingNamingService,
    LiteralNamingService, NamingService, RegistrationId, Selector,
};
