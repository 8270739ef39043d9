//! Entity model for media and releases.
//!
//! These are plain records: the naming side reads them, the parsing side
//! builds them. None of them carries behavior beyond small accessors.

mod entity;
mod episode;
mod movie;
mod release;
mod series;

pub use entity::{Entity, EntityKind, EntityType, Media};
pub use episode::Episode;
pub use movie::Movie;
pub use release::{Group, Release, SubtitleRelease, Tag};
pub use series::{Season, Series, SeriesType};
