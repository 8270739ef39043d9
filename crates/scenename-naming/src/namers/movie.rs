use scenename_core::property::movie;
use scenename_core::{Movie, Result};

use super::Namer;
use crate::builder::{NameBuilder, NameStyle};
use crate::params::{NamingParams, keys};

/// `Name [Year]`.
#[derive(Debug, Clone)]
pub struct MovieNamer {
    style: NameStyle,
}

impl MovieNamer {
    pub fn new(style: NameStyle) -> Self {
        Self { style }
    }
}

impl Namer<Movie> for MovieNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Movie,
        params: &NamingParams,
    ) -> Result<()> {
        builder.append(movie::NAME, candidate.name.as_str())?;
        if params.bool(keys::INCLUDE_YEAR, true) {
            builder.append_opt(movie::YEAR, candidate.year)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namers::testing::{plain_style, scene_style};

    #[test]
    fn movie_names() {
        let params = NamingParams::new();
        let inception = Movie::new("Inception").with_year(2010);
        assert_eq!(
            MovieNamer::new(plain_style()).name(&inception, &params).unwrap(),
            "Inception 2010"
        );
        assert_eq!(
            MovieNamer::new(scene_style()).name(&inception, &params).unwrap(),
            "Inception.2010"
        );
        assert_eq!(
            MovieNamer::new(plain_style())
                .name(&Movie::new("Heat"), &params)
                .unwrap(),
            "Heat"
        );
    }
}
