use std::sync::Arc;

use scenename_core::{Media, Result};

use super::{EpisodeNamer, MovieNamer, Namer, SeasonNamer, SeriesNamer};
use crate::builder::{NameBuilder, NameStyle};
use crate::params::NamingParams;

/// Names any [`Media`] item with the namer of its shape.
#[derive(Debug, Clone)]
pub struct MediaNamer {
    series: Arc<SeriesNamer>,
    season: Arc<SeasonNamer>,
    episode: Arc<EpisodeNamer>,
    movie: Arc<MovieNamer>,
}

impl MediaNamer {
    pub fn new(
        series: Arc<SeriesNamer>,
        season: Arc<SeasonNamer>,
        episode: Arc<EpisodeNamer>,
        movie: Arc<MovieNamer>,
    ) -> Self {
        Self {
            series,
            season,
            episode,
            movie,
        }
    }
}

impl Namer<Media> for MediaNamer {
    fn style(&self) -> &NameStyle {
        self.series.style()
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Media,
        params: &NamingParams,
    ) -> Result<()> {
        match candidate {
            Media::Series(series) => self.series.build_name(builder, series, params),
            Media::Season(season) => self.season.build_name(builder, season, params),
            Media::Episode(episode) => self.episode.build_name(builder, episode, params),
            Media::Movie(movie) => self.movie.build_name(builder, movie, params),
        }
    }
}
