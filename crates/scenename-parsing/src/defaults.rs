//! The default parsing setup.
//!
//! [`ParsingDefaults`] compiles the default [`Grammar`] once and wires one
//! [`MappingParser`] per entity shape into a [`TypedParsingService`]. The
//! service tries, in order: subtitle releases, releases, episodes,
//! seasons, movies and series.

use std::sync::{Arc, LazyLock};

use tracing::debug;

use scenename_core::convert::{
    DateConverter, NumberConverter, SceneTextConverter, TagsConverter,
};
use scenename_core::property::{episode, movie, season, series, subtitle};
use scenename_core::{
    ConfigError, ConverterService, Entity, Episode, Movie, Release, Season, Series,
    SubtitleRelease, ValueKind,
};

use crate::config::ParsingConfig;
use crate::grammar::{Grammar, MediaShape};
use crate::mapper::{
    Mapper, MovieMapper, MultiEpisodeMapper, ReleaseMapper, SeasonMapper, SeriesMapper,
    SubtitleReleaseMapper,
};
use crate::parser::MappingParser;
use crate::service::{ParsingService, TypedParsingService};
use crate::vocab::LanguageConverter;

static SHARED: LazyLock<ParsingDefaults> = LazyLock::new(|| {
    ParsingDefaults::new(&ParsingConfig::default()).expect("default parsing configuration is valid")
});

/// Converters for scene text, numbers, air dates, tag lists and languages.
pub fn default_converters(languages: &LanguageConverter) -> ConverterService {
    ConverterService::builder()
        .property(series::NAME, SceneTextConverter)
        .property(season::TITLE, SceneTextConverter)
        .property(episode::TITLE, SceneTextConverter)
        .property(movie::NAME, SceneTextConverter)
        .property(season::NUMBER, NumberConverter::new("S", 2))
        .property(episode::NUMBER_IN_SEASON, NumberConverter::new("E", 2))
        .property(episode::NUMBER_IN_SERIES, NumberConverter::new("E", 2))
        .property(episode::DATE, DateConverter::default())
        .property(subtitle::LANGUAGE, languages.clone())
        .kind(ValueKind::Tags, TagsConverter::default())
        .build()
}

fn parser<T>(
    name: &str,
    mapper: impl Mapper<T> + 'static,
    matchers: Vec<crate::matcher::PatternMatcher>,
) -> Arc<MappingParser<T>> {
    let mapper: Arc<dyn Mapper<T>> = Arc::new(mapper);
    Arc::new(MappingParser::new(name, mapper).with_matchers(matchers))
}

/// Grammar, parsers and parsing service built from one configuration.
#[derive(Debug)]
pub struct ParsingDefaults {
    config: ParsingConfig,
    languages: LanguageConverter,
    converters: Arc<ConverterService>,
    grammar: Grammar,
    episode_parser: Arc<MappingParser<Vec<Episode>>>,
    season_parser: Arc<MappingParser<Season>>,
    movie_parser: Arc<MappingParser<Movie>>,
    series_parser: Arc<MappingParser<Series>>,
    release_parser: Arc<MappingParser<Release>>,
    subtitle_parser: Arc<MappingParser<SubtitleRelease>>,
    parsing_service: Arc<TypedParsingService>,
}

impl ParsingDefaults {
    pub fn new(config: &ParsingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let languages = LanguageConverter::new(config.extra_languages.clone());
        let converters = Arc::new(default_converters(&languages));
        let grammar = Grammar::new(config, &languages);

        let episode_parser = parser(
            "episode",
            MultiEpisodeMapper::new(Arc::clone(&converters)),
            grammar.media_matchers(&MediaShape::EPISODES)?,
        );
        let season_parser = parser(
            "season",
            SeasonMapper::new(Arc::clone(&converters)),
            grammar.media_matchers(&[MediaShape::Season])?,
        );
        let movie_parser = parser(
            "movie",
            MovieMapper::new(Arc::clone(&converters)),
            grammar.media_matchers(&[MediaShape::Movie])?,
        );
        let series_parser = parser(
            "series",
            SeriesMapper::new(Arc::clone(&converters)),
            grammar.media_matchers(&[MediaShape::Series])?,
        );
        let release_parser = parser(
            "release",
            ReleaseMapper::new(Arc::clone(&converters)),
            grammar.release_matchers()?,
        );
        let subtitle_parser = parser(
            "subtitle release",
            SubtitleReleaseMapper::new(Arc::clone(&converters)),
            grammar.subtitle_matchers()?,
        );

        let parsing_service = Arc::new(TypedParsingService::new());
        parsing_service.register_parser(Arc::clone(&subtitle_parser));
        parsing_service.register_parser(Arc::clone(&release_parser));
        parsing_service.register_parser(Arc::clone(&episode_parser));
        parsing_service.register_parser(Arc::clone(&season_parser));
        parsing_service.register_parser(Arc::clone(&movie_parser));
        parsing_service.register_parser(Arc::clone(&series_parser));
        debug!(
            extra_tags = config.extra_tags.len(),
            extra_languages = config.extra_languages.len(),
            "parsing defaults ready"
        );

        Ok(Self {
            config: config.clone(),
            languages,
            converters,
            grammar,
            episode_parser,
            season_parser,
            movie_parser,
            series_parser,
            release_parser,
            subtitle_parser,
            parsing_service,
        })
    }

    /// Process-wide defaults built from [`ParsingConfig::default`].
    pub fn shared() -> &'static ParsingDefaults {
        &SHARED
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn converters(&self) -> Arc<ConverterService> {
        Arc::clone(&self.converters)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn languages(&self) -> &LanguageConverter {
        &self.languages
    }

    pub fn episode_parser(&self) -> Arc<MappingParser<Vec<Episode>>> {
        Arc::clone(&self.episode_parser)
    }

    pub fn season_parser(&self) -> Arc<MappingParser<Season>> {
        Arc::clone(&self.season_parser)
    }

    pub fn movie_parser(&self) -> Arc<MappingParser<Movie>> {
        Arc::clone(&self.movie_parser)
    }

    pub fn series_parser(&self) -> Arc<MappingParser<Series>> {
        Arc::clone(&self.series_parser)
    }

    pub fn release_parser(&self) -> Arc<MappingParser<Release>> {
        Arc::clone(&self.release_parser)
    }

    pub fn subtitle_parser(&self) -> Arc<MappingParser<SubtitleRelease>> {
        Arc::clone(&self.subtitle_parser)
    }

    /// Subtitle releases, releases, then media.
    pub fn parsing_service(&self) -> Arc<TypedParsingService> {
        Arc::clone(&self.parsing_service)
    }

    /// A subtitle parser for names without a language token, reporting
    /// `language` for every match.
    ///
    /// `language` may be a name or a code and must be known.
    pub fn fixed_language_subtitle_parser(
        &self,
        language: &str,
    ) -> Result<Arc<MappingParser<SubtitleRelease>>, ConfigError> {
        let canonical = self.languages.language(language).ok_or_else(|| {
            ConfigError::invalid_value("language", format!("unknown language {language:?}"))
        })?;
        Ok(parser(
            &format!("{canonical} subtitle release"),
            SubtitleReleaseMapper::new(Arc::clone(&self.converters)),
            self.grammar.fixed_language_subtitle_matchers(&canonical)?,
        ))
    }
}

/// Parse `text` with the shared default parsing service.
pub fn parse(text: &str) -> scenename_core::Result<Entity> {
    ParsingDefaults::shared().parsing_service().parse(text)
}
