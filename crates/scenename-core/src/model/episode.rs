//! Episode records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::{Season, Series, SeriesType};

/// A single episode.
///
/// When both `series` and `season` are set, `season.series` is expected to
/// be the same series; the parsing side always builds them that way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Episode {
    pub series: Option<Series>,
    pub season: Option<Season>,
    pub number_in_season: Option<u32>,
    pub number_in_series: Option<u32>,
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
}

impl Episode {
    /// A seasoned episode such as `Psych S08E01`.
    pub fn seasoned(series: Series, season: u32, number: u32) -> Self {
        let series = series.with_type(SeriesType::Seasoned);
        Self {
            season: Some(Season::new(series.clone(), season)),
            series: Some(series),
            number_in_season: Some(number),
            ..Default::default()
        }
    }

    /// A mini-series episode numbered within the series only.
    pub fn mini_series(series: Series, number: u32) -> Self {
        Self {
            series: Some(series.with_type(SeriesType::MiniSeries)),
            number_in_series: Some(number),
            ..Default::default()
        }
    }

    /// An episode of a dated series, identified by air date.
    pub fn dated(series: Series, date: NaiveDate) -> Self {
        Self {
            series: Some(series.with_type(SeriesType::Dated)),
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The series shape this episode belongs to.
    ///
    /// Taken from the series when present, otherwise inferred from which
    /// identifying fields are set.
    pub fn series_type(&self) -> SeriesType {
        if let Some(series) = &self.series {
            return series.series_type;
        }
        if self.season.is_some() || self.number_in_season.is_some() {
            SeriesType::Seasoned
        } else if self.number_in_series.is_some() {
            SeriesType::MiniSeries
        } else if self.date.is_some() {
            SeriesType::Dated
        } else {
            SeriesType::Seasoned
        }
    }

    pub fn is_numbered_in_season(&self) -> bool {
        self.number_in_season.is_some()
    }

    pub fn is_numbered_in_series(&self) -> bool {
        self.number_in_series.is_some()
    }

    pub fn season_number(&self) -> Option<u32> {
        self.season.as_ref().and_then(|s| s.number)
    }
}
