use std::sync::Arc;

use tracing::debug;

use scenename_core::property::{episode, movie, season, series};
use scenename_core::{
    ConverterService, EntityKind, Episode, MappingError, Media, Movie, PropertyMap, Season, Series,
    SeriesType,
};

use super::{Fields, Mapper, expand_properties};

/// Maps `series.*` properties.
///
/// The series type of a standalone series defaults to seasoned; episode
/// mappers pass the type implied by the episode's numbering.
#[derive(Debug, Clone)]
pub struct SeriesMapper {
    converters: Arc<ConverterService>,
}

impl SeriesMapper {
    pub fn new(converters: Arc<ConverterService>) -> Self {
        Self { converters }
    }

    pub fn map_with_type(
        &self,
        properties: &PropertyMap,
        series_type: SeriesType,
    ) -> Result<Series, MappingError> {
        let fields = Fields::new(properties, &self.converters, EntityKind::Series);
        Ok(Series {
            name: fields.required_text(series::NAME)?,
            year: fields.year(series::YEAR)?,
            series_type,
        })
    }
}

impl Mapper<Series> for SeriesMapper {
    fn map(&self, properties: &PropertyMap) -> Result<Series, MappingError> {
        self.map_with_type(properties, SeriesType::Seasoned)
    }
}

/// Maps `season.*` properties plus the owning series.
#[derive(Debug, Clone)]
pub struct SeasonMapper {
    converters: Arc<ConverterService>,
    series: SeriesMapper,
}

impl SeasonMapper {
    pub fn new(converters: Arc<ConverterService>) -> Self {
        Self {
            series: SeriesMapper::new(Arc::clone(&converters)),
            converters,
        }
    }

    /// Map the season part of `properties` onto `series`.
    fn map_for(
        &self,
        properties: &PropertyMap,
        series: Option<Series>,
    ) -> Result<Season, MappingError> {
        let fields = Fields::new(properties, &self.converters, EntityKind::Season);
        let number = fields.number(season::NUMBER)?;
        let title = fields.text(season::TITLE)?;
        if number.is_none() && title.is_none() {
            return Err(fields.missing(season::NUMBER));
        }
        Ok(Season {
            series,
            number,
            title,
        })
    }
}

impl Mapper<Season> for SeasonMapper {
    fn map(&self, properties: &PropertyMap) -> Result<Season, MappingError> {
        let series = if properties.contains(series::NAME) {
            Some(self.series.map_with_type(properties, SeriesType::Seasoned)?)
        } else {
            None
        };
        self.map_for(properties, series)
    }
}

/// Maps one episode.
///
/// The series type follows the numbering present: a season or in-season
/// number means seasoned, an in-series number means mini-series and an air
/// date means dated. An episode needs at least one of these or a title.
#[derive(Debug, Clone)]
pub struct EpisodeMapper {
    converters: Arc<ConverterService>,
    series: SeriesMapper,
    season: SeasonMapper,
}

impl EpisodeMapper {
    pub fn new(converters: Arc<ConverterService>) -> Self {
        Self {
            series: SeriesMapper::new(Arc::clone(&converters)),
            season: SeasonMapper::new(Arc::clone(&converters)),
            converters,
        }
    }

    fn series_type(properties: &PropertyMap) -> SeriesType {
        if properties.contains(season::NUMBER) || properties.contains(episode::NUMBER_IN_SEASON) {
            SeriesType::Seasoned
        } else if properties.contains(episode::NUMBER_IN_SERIES) {
            SeriesType::MiniSeries
        } else if properties.contains(episode::DATE) {
            SeriesType::Dated
        } else {
            SeriesType::Seasoned
        }
    }
}

impl Mapper<Episode> for EpisodeMapper {
    fn map(&self, properties: &PropertyMap) -> Result<Episode, MappingError> {
        let fields = Fields::new(properties, &self.converters, EntityKind::Episode);
        let series_type = Self::series_type(properties);

        let series = if fields.has(series::NAME) {
            Some(self.series.map_with_type(properties, series_type)?)
        } else {
            None
        };
        let season = if fields.has(season::NUMBER) {
            Some(self.season.map_for(properties, series.clone())?)
        } else {
            None
        };

        let number_in_season = fields.number(episode::NUMBER_IN_SEASON)?;
        let number_in_series = fields.number(episode::NUMBER_IN_SERIES)?;
        let date = fields.date(episode::DATE)?;
        let title = fields.text(episode::TITLE)?;
        if number_in_season.is_none()
            && number_in_series.is_none()
            && date.is_none()
            && title.is_none()
        {
            return Err(fields.error("episode has no number, date or title"));
        }

        Ok(Episode {
            series,
            season,
            number_in_season,
            number_in_series,
            date,
            title,
        })
    }
}

/// Maps a possibly multi-episode token into one episode per number.
///
/// `E01-E03` yields three episodes that share every other property.
#[derive(Debug, Clone)]
pub struct MultiEpisodeMapper {
    episode: EpisodeMapper,
}

impl MultiEpisodeMapper {
    pub fn new(converters: Arc<ConverterService>) -> Self {
        Self {
            episode: EpisodeMapper::new(converters),
        }
    }
}

impl Mapper<Vec<Episode>> for MultiEpisodeMapper {
    fn map(&self, properties: &PropertyMap) -> Result<Vec<Episode>, MappingError> {
        let key = if properties.contains(episode::NUMBER_IN_SEASON) {
            episode::NUMBER_IN_SEASON
        } else {
            episode::NUMBER_IN_SERIES
        };
        let expanded = expand_properties(properties, key);
        if expanded.len() > 1 {
            debug!(count = expanded.len(), "expanded multi-episode token");
        }
        expanded.iter().map(|single| self.episode.map(single)).collect()
    }
}

/// Maps `movie.*` properties.
#[derive(Debug, Clone)]
pub struct MovieMapper {
    converters: Arc<ConverterService>,
}

impl MovieMapper {
    pub fn new(converters: Arc<ConverterService>) -> Self {
        Self { converters }
    }
}

impl Mapper<Movie> for MovieMapper {
    fn map(&self, properties: &PropertyMap) -> Result<Movie, MappingError> {
        let fields = Fields::new(properties, &self.converters, EntityKind::Movie);
        Ok(Movie {
            name: fields.required_text(movie::NAME)?,
            year: fields.year(movie::YEAR)?,
        })
    }
}

/// Maps whichever media shape the properties describe.
///
/// Checked in order: episodes (numbers or date present), season, movie,
/// series.
#[derive(Debug, Clone)]
pub struct MediaMapper {
    series: SeriesMapper,
    season: SeasonMapper,
    episodes: MultiEpisodeMapper,
    movie: MovieMapper,
    target: EntityKind,
}

impl MediaMapper {
    /// Mapping failures are reported against `target`, the entity the
    /// media belongs to.
    pub fn new(converters: Arc<ConverterService>, target: EntityKind) -> Self {
        Self {
            series: SeriesMapper::new(Arc::clone(&converters)),
            season: SeasonMapper::new(Arc::clone(&converters)),
            episodes: MultiEpisodeMapper::new(Arc::clone(&converters)),
            movie: MovieMapper::new(converters),
            target,
        }
    }
}

impl Mapper<Vec<Media>> for MediaMapper {
    fn map(&self, properties: &PropertyMap) -> Result<Vec<Media>, MappingError> {
        let has_episode = [
            episode::NUMBER_IN_SEASON,
            episode::NUMBER_IN_SERIES,
            episode::DATE,
        ]
        .into_iter()
        .any(|key| properties.contains(key));

        if has_episode {
            let episodes = self.episodes.map(properties)?;
            Ok(episodes.into_iter().map(Media::Episode).collect())
        } else if properties.contains(season::NUMBER) || properties.contains(season::TITLE) {
            Ok(vec![Media::Season(self.season.map(properties)?)])
        } else if properties.contains(movie::NAME) {
            Ok(vec![Media::Movie(self.movie.map(properties)?)])
        } else if properties.contains(series::NAME) {
            Ok(vec![Media::Series(self.series.map(properties)?)])
        } else {
            Err(MappingError::new(
                self.target,
                properties,
                "no media properties",
            ))
        }
    }
}
