use std::sync::Arc;

use tracing::debug;

use scenename_core::property::episode;
use scenename_core::{Episode, PropertyKey, Result, SeriesType};

use super::{EpisodeNamer, Namer};
use crate::builder::{NameBuilder, NameStyle};
use crate::params::{NamingParams, keys};
use crate::separator::SeparationType;

/// Split `numbers` into maximal runs where each number is exactly one
/// greater than the one before it.
///
/// Concatenating the runs gives back the input.
///
/// ```
/// use scenename_naming::namers::split_into_consecutive_runs;
///
/// assert_eq!(split_into_consecutive_runs(&[1, 2, 4]), vec![vec![1, 2], vec![4]]);
/// ```
pub fn split_into_consecutive_runs(numbers: &[u32]) -> Vec<Vec<u32>> {
    let mut runs: Vec<Vec<u32>> = Vec::new();
    for &number in numbers {
        match runs.last_mut() {
            Some(run) if run.last().and_then(|last| last.checked_add(1)) == Some(number) => {
                run.push(number)
            }
            _ => runs.push(vec![number]),
        }
    }
    runs
}

/// Names several episodes as one, e.g. `Psych S08E01-E03`.
///
/// The first episode is named in full without its title, then the remaining
/// numbers are compressed into runs. Episodes that do not share a series, a
/// season and a numbering scheme are instead named one by one and joined
/// with the item separator.
#[derive(Debug, Clone)]
pub struct MultiEpisodeNamer {
    style: NameStyle,
    episode: Arc<EpisodeNamer>,
}

impl MultiEpisodeNamer {
    pub fn new(style: NameStyle, episode: Arc<EpisodeNamer>) -> Self {
        Self { style, episode }
    }

    /// Append the combined name of `episodes` to `builder`.
    pub fn build_episodes(
        &self,
        builder: &mut NameBuilder<'_>,
        episodes: &[&Episode],
        params: &NamingParams,
    ) -> Result<()> {
        let Some((first, rest)) = episodes.split_first() else {
            return Ok(());
        };
        if rest.is_empty() {
            return self.episode.build_name(builder, first, params);
        }

        match compressible_numbers(episodes) {
            Some((key, numbers)) => {
                let first_params = params.with(keys::INCLUDE_TITLE, false);
                self.episode.build_name(builder, first, &first_params)?;
                let runs = split_into_consecutive_runs(&numbers);
                append_runs(builder, key, &runs, true)
            }
            None => {
                debug!(count = episodes.len(), "episodes not compressible, naming each");
                self.episode.build_name(builder, first, params)?;
                let plain = builder.style().without_formatter();
                for ep in rest {
                    let mut item = NameBuilder::new(&plain);
                    self.episode.build_name(&mut item, ep, params)?;
                    builder.append_with(episode::NAME, item.finish(), SeparationType::ITEM)?;
                }
                Ok(())
            }
        }
    }

    /// A complete name for `episodes` in this namer's style.
    pub fn name_episodes(&self, episodes: &[&Episode], params: &NamingParams) -> Result<String> {
        let mut builder = NameBuilder::new(&self.style);
        self.build_episodes(&mut builder, episodes, params)?;
        Ok(builder.finish())
    }
}

impl Namer<[Episode]> for MultiEpisodeNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &[Episode],
        params: &NamingParams,
    ) -> Result<()> {
        let episodes: Vec<&Episode> = candidate.iter().collect();
        self.build_episodes(builder, &episodes, params)
    }
}

/// The numbering key and numbers of `episodes`, if they share a series,
/// a season and a numbering scheme.
fn compressible_numbers(episodes: &[&Episode]) -> Option<(PropertyKey, Vec<u32>)> {
    let first = episodes.first()?;
    let same_series = episodes.iter().all(|ep| ep.series == first.series);
    let same_season = episodes.iter().all(|ep| ep.season_number() == first.season_number());
    if !same_series || !same_season {
        return None;
    }
    let numbers: Option<Vec<u32>> = match first.series_type() {
        SeriesType::Seasoned => episodes.iter().map(|ep| ep.number_in_season).collect(),
        SeriesType::MiniSeries => episodes.iter().map(|ep| ep.number_in_series).collect(),
        SeriesType::Dated => None,
    };
    let key = match first.series_type() {
        SeriesType::MiniSeries => episode::NUMBER_IN_SERIES,
        _ => episode::NUMBER_IN_SEASON,
    };
    numbers.map(|numbers| (key, numbers))
}

fn append_runs(
    builder: &mut NameBuilder<'_>,
    key: PropertyKey,
    runs: &[Vec<u32>],
    omit_first: bool,
) -> Result<()> {
    for (index, run) in runs.iter().enumerate() {
        let skip_head = omit_first && index == 0;
        let (Some(&head), Some(&last)) = (run.first(), run.last()) else {
            continue;
        };
        if run.len() <= 2 {
            for &number in run.iter().skip(usize::from(skip_head)) {
                builder.append_with(key, number, SeparationType::ADDITION)?;
            }
        } else {
            if !skip_head {
                builder.append_with(key, head, SeparationType::ADDITION)?;
            }
            builder.append_with(key, last, SeparationType::RANGE)?;
        }
    }
    Ok(())
}
