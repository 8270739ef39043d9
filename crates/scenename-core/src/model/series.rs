//! Series and season records.

use serde::{Deserialize, Serialize};

/// How the episodes of a series are identified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesType {
    /// Episodes carry a season and a number within that season.
    #[default]
    Seasoned,
    /// Episodes carry a number within the whole series only.
    MiniSeries,
    /// Episodes are identified by their air date.
    Dated,
}

/// A TV series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub year: Option<i32>,
    pub series_type: SeriesType,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, series_type: SeriesType) -> Self {
        self.series_type = series_type;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// A season of a series.
///
/// A season is either numbered (`S08`) or identified by its title only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season {
    pub series: Option<Series>,
    pub number: Option<u32>,
    pub title: Option<String>,
}

impl Season {
    pub fn new(series: Series, number: u32) -> Self {
        Self {
            series: Some(series),
            number: Some(number),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_numbered(&self) -> bool {
        self.number.is_some()
    }
}
