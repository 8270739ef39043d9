use std::sync::Arc;

use scenename_core::property::{season, series};
use scenename_core::{Result, Season, Series};

use super::Namer;
use crate::builder::{NameBuilder, NameStyle};
use crate::params::{NamingParams, keys};

/// `Name [Year]`.
#[derive(Debug, Clone)]
pub struct SeriesNamer {
    style: NameStyle,
}

impl SeriesNamer {
    pub fn new(style: NameStyle) -> Self {
        Self { style }
    }
}

impl Namer<Series> for SeriesNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Series,
        params: &NamingParams,
    ) -> Result<()> {
        builder.append(series::NAME, candidate.name.as_str())?;
        if params.bool(keys::INCLUDE_YEAR, true) {
            builder.append_opt(series::YEAR, candidate.year)?;
        }
        Ok(())
    }
}

/// `[Series] Sxx [Title]`, or `[Series] Title` for unnumbered seasons.
///
/// The title of a numbered season is decorative and follows
/// [`keys::INCLUDE_TITLE`]; the title of an unnumbered season identifies it
/// and is always included.
#[derive(Debug, Clone)]
pub struct SeasonNamer {
    style: NameStyle,
    series: Arc<SeriesNamer>,
}

impl SeasonNamer {
    pub fn new(style: NameStyle, series: Arc<SeriesNamer>) -> Self {
        Self { style, series }
    }
}

impl Namer<Season> for SeasonNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Season,
        params: &NamingParams,
    ) -> Result<()> {
        if params.bool(keys::INCLUDE_SERIES, true) {
            if let Some(parent) = &candidate.series {
                self.series.build_name(builder, parent, params)?;
            }
        }
        match candidate.number {
            Some(number) => {
                builder.append(season::NUMBER, number)?;
                if params.bool(keys::INCLUDE_TITLE, true) {
                    builder.append_opt(season::TITLE, candidate.title.as_deref())?;
                }
            }
            None => {
                builder.append_opt(season::TITLE, candidate.title.as_deref())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namers::testing::plain_style;

    fn namers() -> (Arc<SeriesNamer>, SeasonNamer) {
        let series = Arc::new(SeriesNamer::new(plain_style()));
        let season = SeasonNamer::new(plain_style(), Arc::clone(&series));
        (series, season)
    }

    #[test]
    fn series_with_and_without_year() {
        let (series, _) = namers();
        let params = NamingParams::new();
        assert_eq!(series.name(&Series::new("Psych"), &params).unwrap(), "Psych");
        let doctor = Series::new("Doctor Who").with_year(2005);
        assert_eq!(series.name(&doctor, &params).unwrap(), "Doctor Who 2005");
        let no_year = params.with(keys::INCLUDE_YEAR, false);
        assert_eq!(series.name(&doctor, &no_year).unwrap(), "Doctor Who");
    }

    #[test]
    fn numbered_season() {
        let (_, season) = namers();
        let s = Season::new(Series::new("Psych"), 8).with_title("Final Season");
        let params = NamingParams::new();
        assert_eq!(season.name(&s, &params).unwrap(), "Psych S08 Final Season");
        let untitled = params.with(keys::INCLUDE_TITLE, false);
        assert_eq!(season.name(&s, &untitled).unwrap(), "Psych S08");
        let bare = untitled.with(keys::INCLUDE_SERIES, false);
        assert_eq!(season.name(&s, &bare).unwrap(), "S08");
    }

    #[test]
    fn unnumbered_season_keeps_its_title() {
        let (_, season) = namers();
        let s = Season {
            series: Some(Series::new("Sherlock")),
            number: None,
            title: Some("Specials".to_string()),
        };
        let params = NamingParams::new().with(keys::INCLUDE_TITLE, false);
        assert_eq!(season.name(&s, &params).unwrap(), "Sherlock Specials");
    }
}
