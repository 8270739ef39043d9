use std::sync::Arc;

use scenename_core::property::episode;
use scenename_core::{Episode, Result, Series, SeriesType};

use super::{Namer, SeasonNamer, SeriesNamer};
use crate::builder::{NameBuilder, NameStyle};
use crate::params::{NamingParams, keys};

fn parent_series(candidate: &Episode) -> Option<&Series> {
    candidate
        .series
        .as_ref()
        .or_else(|| candidate.season.as_ref().and_then(|s| s.series.as_ref()))
}

fn append_series(
    series: &SeriesNamer,
    builder: &mut NameBuilder<'_>,
    candidate: &Episode,
    params: &NamingParams,
) -> Result<()> {
    if params.bool(keys::INCLUDE_SERIES, true) {
        if let Some(parent) = parent_series(candidate) {
            series.build_name(builder, parent, params)?;
        }
    }
    Ok(())
}

/// Appends the title only if it is decorative and titles are enabled, or if
/// the episode has no number to identify it.
fn append_title(
    builder: &mut NameBuilder<'_>,
    candidate: &Episode,
    identified: bool,
    params: &NamingParams,
) -> Result<()> {
    if !identified || params.bool(keys::INCLUDE_TITLE, true) {
        builder.append_opt(episode::TITLE, candidate.title.as_deref())?;
    }
    Ok(())
}

/// `Series Sxx Eyy [Title]`.
#[derive(Debug, Clone)]
pub struct SeasonedEpisodeNamer {
    style: NameStyle,
    series: Arc<SeriesNamer>,
    season: Arc<SeasonNamer>,
}

impl SeasonedEpisodeNamer {
    pub fn new(style: NameStyle, series: Arc<SeriesNamer>, season: Arc<SeasonNamer>) -> Self {
        Self {
            style,
            series,
            season,
        }
    }
}

impl Namer<Episode> for SeasonedEpisodeNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Episode,
        params: &NamingParams,
    ) -> Result<()> {
        append_series(&self.series, builder, candidate, params)?;
        if params.bool(keys::INCLUDE_SEASON, true) {
            if let Some(season) = &candidate.season {
                let season_params = params
                    .with(keys::INCLUDE_SERIES, false)
                    .with(keys::INCLUDE_TITLE, false);
                self.season.build_name(builder, season, &season_params)?;
            }
        }
        builder.append_opt(episode::NUMBER_IN_SEASON, candidate.number_in_season)?;
        append_title(builder, candidate, candidate.is_numbered_in_season(), params)
    }
}

/// `Series Eyy [Title]`, numbered within the whole series.
#[derive(Debug, Clone)]
pub struct MiniSeriesEpisodeNamer {
    style: NameStyle,
    series: Arc<SeriesNamer>,
}

impl MiniSeriesEpisodeNamer {
    pub fn new(style: NameStyle, series: Arc<SeriesNamer>) -> Self {
        Self { style, series }
    }
}

impl Namer<Episode> for MiniSeriesEpisodeNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Episode,
        params: &NamingParams,
    ) -> Result<()> {
        append_series(&self.series, builder, candidate, params)?;
        builder.append_opt(episode::NUMBER_IN_SERIES, candidate.number_in_series)?;
        append_title(builder, candidate, candidate.is_numbered_in_series(), params)
    }
}

/// `Series YYYY.MM.DD [Title]`.
#[derive(Debug, Clone)]
pub struct DatedEpisodeNamer {
    style: NameStyle,
    series: Arc<SeriesNamer>,
}

impl DatedEpisodeNamer {
    pub fn new(style: NameStyle, series: Arc<SeriesNamer>) -> Self {
        Self { style, series }
    }
}

impl Namer<Episode> for DatedEpisodeNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Episode,
        params: &NamingParams,
    ) -> Result<()> {
        append_series(&self.series, builder, candidate, params)?;
        builder.append_opt(episode::DATE, candidate.date)?;
        append_title(builder, candidate, candidate.date.is_some(), params)
    }
}

/// Dispatches to the namer matching the episode's series type.
#[derive(Debug, Clone)]
pub struct EpisodeNamer {
    seasoned: SeasonedEpisodeNamer,
    mini_series: MiniSeriesEpisodeNamer,
    dated: DatedEpisodeNamer,
}

impl EpisodeNamer {
    pub fn new(
        seasoned: SeasonedEpisodeNamer,
        mini_series: MiniSeriesEpisodeNamer,
        dated: DatedEpisodeNamer,
    ) -> Self {
        Self {
            seasoned,
            mini_series,
            dated,
        }
    }

    fn select(&self, candidate: &Episode) -> &dyn Namer<Episode> {
        match candidate.series_type() {
            SeriesType::Seasoned => &self.seasoned,
            SeriesType::MiniSeries => &self.mini_series,
            SeriesType::Dated => &self.dated,
        }
    }
}

impl Namer<Episode> for EpisodeNamer {
    fn style(&self) -> &NameStyle {
        self.seasoned.style()
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Episode,
        params: &NamingParams,
    ) -> Result<()> {
        self.select(candidate).build_name(builder, candidate, params)
    }
}
