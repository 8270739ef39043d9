//! Entity namers.
//!
//! A [`Namer`] describes how one entity shape contributes to a name by
//! appending its fields to a [`NameBuilder`]. Composite namers delegate to
//! the namers of their parts on the same builder, so an episode name
//! embedded in a release name shares the release's separator rules.

mod episode;
mod media;
mod movie;
mod multi;
mod release;
mod series;
mod subtitle;

pub use episode::{DatedEpisodeNamer, EpisodeNamer, MiniSeriesEpisodeNamer, SeasonedEpisodeNamer};
pub use media::MediaNamer;
pub use movie::MovieNamer;
pub use multi::{MultiEpisodeNamer, split_into_consecutive_runs};
pub use release::{GroupNamer, ReleaseNamer, TagNamer};
pub use series::{SeasonNamer, SeriesNamer};
pub use subtitle::SubtitleReleaseNamer;

use scenename_core::Result;

use crate::builder::{NameBuilder, NameStyle};
use crate::params::NamingParams;

/// Builds names for values of type `T`.
pub trait Namer<T: ?Sized>: Send + Sync {
    /// The style of names produced by [`name`](Self::name).
    fn style(&self) -> &NameStyle;

    /// Append the parts of `candidate` to `builder`.
    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &T,
        params: &NamingParams,
    ) -> Result<()>;

    /// A complete name for `candidate` in this namer's style.
    fn name(&self, candidate: &T, params: &NamingParams) -> Result<String> {
        let mut builder = NameBuilder::new(self.style());
        self.build_name(&mut builder, candidate, params)?;
        Ok(builder.finish())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::builder::NameStyle;
    use crate::config::NamingConfig;
    use crate::defaults::{NamingDefaults, default_converters, separator_rules};
    use crate::format::scene_formatter;

    pub fn plain_style() -> NameStyle {
        let config = NamingConfig::default();
        NameStyle::new(
            Arc::new(default_converters(&config)),
            Arc::new(separator_rules(&config, &config.default_separator).unwrap()),
        )
    }

    pub fn scene_style() -> NameStyle {
        let config = NamingConfig::default();
        NameStyle::new(
            Arc::new(default_converters(&config)),
            Arc::new(separator_rules(&config, &config.release_separator).unwrap()),
        )
        .with_formatter(scene_formatter())
    }

    pub fn defaults() -> NamingDefaults {
        NamingDefaults::new(&NamingConfig::default()).unwrap()
    }
}
