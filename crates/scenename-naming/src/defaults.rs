//! The default naming setup.
//!
//! [`NamingDefaults`] wires converters, separator rules, namers and naming
//! services together from a [`NamingConfig`]. Two styles are built:
//!
//! - the plain style, `Psych S08E01 Juliet Takes a Luvvah`, separated by
//!   `default_separator`
//! - the scene style, `Psych.S08E01.HDTV.x264-EXCELLENCE`, separated by
//!   `release_separator` and passed through [`scene_format`]
//!
//! [`scene_format`]: crate::format::scene_format

use std::sync::{Arc, LazyLock};

use tracing::debug;

use scenename_core::convert::{DateConverter, NumberConverter, TagsConverter};
use scenename_core::property::{episode, release, season, subtitle};
use scenename_core::{
    ConfigError, ConverterService, Entity, Episode, Group, Movie, Release, Season, Series,
    SubtitleRelease, Tag, ValueKind,
};

use crate::builder::NameStyle;
use crate::config::NamingConfig;
use crate::format::{matching_formatter, scene_formatter};
use crate::namers::{
    DatedEpisodeNamer, EpisodeNamer, GroupNamer, MediaNamer, MiniSeriesEpisodeNamer,
    MovieNamer, MultiEpisodeNamer, ReleaseNamer, SeasonNamer, SeasonedEpisodeNamer,
    SeriesNamer, SubtitleReleaseNamer, TagNamer,
};
use crate::separator::{SeparationType, SeparatorRules};
use crate::service::{
    ConditionalNamingService, DecoratingNamingService, DelegatingNamingService,
    LiteralNamingService, MultiEpisodeService, NamingService, Selector,
};

static SHARED: LazyLock<NamingDefaults> = LazyLock::new(|| {
    NamingDefaults::new(&NamingConfig::default()).expect("default naming configuration is valid")
});

/// Converters for season and episode numbers, air dates and tag lists.
pub fn default_converters(config: &NamingConfig) -> ConverterService {
    ConverterService::builder()
        .property(
            season::NUMBER,
            NumberConverter::new(config.season_prefix.clone(), config.number_width),
        )
        .property(
            episode::NUMBER_IN_SEASON,
            NumberConverter::new(config.episode_prefix.clone(), config.number_width),
        )
        .property(
            episode::NUMBER_IN_SERIES,
            NumberConverter::new(config.episode_prefix.clone(), config.number_width),
        )
        .property(episode::DATE, DateConverter::new(config.date_format.clone()))
        .kind(ValueKind::Tags, TagsConverter::new(" "))
        .build()
}

/// Separator rules with `default_separator` between otherwise unruled parts.
pub fn separator_rules(
    config: &NamingConfig,
    default_separator: &str,
) -> Result<SeparatorRules, ConfigError> {
    SeparatorRules::builder(default_separator)
        .pair(season::NUMBER, episode::NUMBER_IN_SEASON, "")
        .separation_type(SeparationType::RANGE, config.range_separator.clone())
        .separation_type(SeparationType::ADDITION, config.addition_separator.clone())
        .separation_type(SeparationType::ITEM, config.item_separator.clone())
        .before(release::GROUP, config.group_separator.clone())
        .before(subtitle::GROUP, config.group_separator.clone())
        .build()
}

/// One namer per entity shape, all sharing a style.
#[derive(Debug, Clone)]
pub struct NamerSet {
    pub series: Arc<SeriesNamer>,
    pub season: Arc<SeasonNamer>,
    pub episode: Arc<EpisodeNamer>,
    pub multi_episode: Arc<MultiEpisodeNamer>,
    pub movie: Arc<MovieNamer>,
    pub media: Arc<MediaNamer>,
    pub release: Arc<ReleaseNamer>,
    pub subtitle: Arc<SubtitleReleaseNamer>,
    pub tag: Arc<TagNamer>,
    pub group: Arc<GroupNamer>,
}

impl NamerSet {
    pub fn new(style: &NameStyle) -> Self {
        let series = Arc::new(SeriesNamer::new(style.clone()));
        let season = Arc::new(SeasonNamer::new(style.clone(), Arc::clone(&series)));
        let episode = Arc::new(EpisodeNamer::new(
            SeasonedEpisodeNamer::new(style.clone(), Arc::clone(&series), Arc::clone(&season)),
            MiniSeriesEpisodeNamer::new(style.clone(), Arc::clone(&series)),
            DatedEpisodeNamer::new(style.clone(), Arc::clone(&series)),
        ));
        let multi_episode = Arc::new(MultiEpisodeNamer::new(style.clone(), Arc::clone(&episode)));
        let movie = Arc::new(MovieNamer::new(style.clone()));
        let media = Arc::new(MediaNamer::new(
            Arc::clone(&series),
            Arc::clone(&season),
            Arc::clone(&episode),
            Arc::clone(&movie),
        ));
        let release = Arc::new(ReleaseNamer::new(
            style.clone(),
            Arc::clone(&media),
            Arc::clone(&multi_episode),
        ));
        let subtitle = Arc::new(SubtitleReleaseNamer::new(style.clone(), Arc::clone(&release)));
        Self {
            series,
            season,
            episode,
            multi_episode,
            movie,
            media,
            release,
            subtitle,
            tag: Arc::new(TagNamer::new(style.clone())),
            group: Arc::new(GroupNamer::new(style.clone())),
        }
    }
}

/// Registers the media namers of `media` and the release namers of
/// `releases` on a new service.
fn build_service(
    media: &NamerSet,
    releases: &NamerSet,
    list_separator: &str,
) -> ConditionalNamingService {
    let service = ConditionalNamingService::new(list_separator);
    service.register(
        Selector::predicate(|candidate| candidate.as_episode_list().is_some()),
        Arc::new(MultiEpisodeService::new(Arc::clone(&media.multi_episode))),
    );
    service.register_namer::<Series>(media.series.clone());
    service.register_namer::<Season>(media.season.clone());
    service.register_namer::<Episode>(media.episode.clone());
    service.register_namer::<Movie>(media.movie.clone());
    service.register_namer::<Release>(releases.release.clone());
    service.register_namer::<SubtitleRelease>(releases.subtitle.clone());
    service.register_namer::<Tag>(media.tag.clone());
    service.register_namer::<Group>(media.group.clone());
    service
}

/// Converters, styles, namers and services built from one configuration.
#[derive(Debug)]
pub struct NamingDefaults {
    config: NamingConfig,
    plain_style: NameStyle,
    scene_style: NameStyle,
    plain: NamerSet,
    scene: NamerSet,
    naming_service: Arc<ConditionalNamingService>,
    scene_naming_service: Arc<ConditionalNamingService>,
}

impl NamingDefaults {
    pub fn new(config: &NamingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let converters = Arc::new(default_converters(config));
        let plain_style = NameStyle::new(
            Arc::clone(&converters),
            Arc::new(separator_rules(config, &config.default_separator)?),
        );
        let scene_style = NameStyle::new(
            converters,
            Arc::new(separator_rules(config, &config.release_separator)?),
        )
        .with_formatter(scene_formatter());

        let plain = NamerSet::new(&plain_style);
        let scene = NamerSet::new(&scene_style);
        let naming_service = Arc::new(build_service(&plain, &scene, &config.item_separator));
        let scene_naming_service = Arc::new(build_service(&scene, &scene, &config.item_separator));
        debug!(
            default_separator = %config.default_separator,
            release_separator = %config.release_separator,
            "naming defaults ready"
        );

        Ok(Self {
            config: config.clone(),
            plain_style,
            scene_style,
            plain,
            scene,
            naming_service,
            scene_naming_service,
        })
    }

    /// Process-wide defaults built from [`NamingConfig::default`].
    pub fn shared() -> &'static NamingDefaults {
        &SHARED
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    pub fn plain_style(&self) -> &NameStyle {
        &self.plain_style
    }

    pub fn scene_style(&self) -> &NameStyle {
        &self.scene_style
    }

    /// Namers producing plain names.
    pub fn plain(&self) -> &NamerSet {
        &self.plain
    }

    /// Namers producing scene names.
    pub fn scene(&self) -> &NamerSet {
        &self.scene
    }

    pub fn series_namer(&self) -> Arc<SeriesNamer> {
        Arc::clone(&self.plain.series)
    }

    pub fn season_namer(&self) -> Arc<SeasonNamer> {
        Arc::clone(&self.plain.season)
    }

    pub fn episode_namer(&self) -> Arc<EpisodeNamer> {
        Arc::clone(&self.plain.episode)
    }

    pub fn multi_episode_namer(&self) -> Arc<MultiEpisodeNamer> {
        Arc::clone(&self.plain.multi_episode)
    }

    pub fn movie_namer(&self) -> Arc<MovieNamer> {
        Arc::clone(&self.plain.movie)
    }

    pub fn media_namer(&self) -> Arc<MediaNamer> {
        Arc::clone(&self.plain.media)
    }

    pub fn tag_namer(&self) -> Arc<TagNamer> {
        Arc::clone(&self.plain.tag)
    }

    pub fn group_namer(&self) -> Arc<GroupNamer> {
        Arc::clone(&self.plain.group)
    }

    /// Scene-style release namer.
    pub fn release_namer(&self) -> Arc<ReleaseNamer> {
        Arc::clone(&self.scene.release)
    }

    /// Scene-style subtitle release namer.
    pub fn subtitle_namer(&self) -> Arc<SubtitleReleaseNamer> {
        Arc::clone(&self.scene.subtitle)
    }

    /// Plain names for media, scene names for releases and subtitles.
    pub fn naming_service(&self) -> Arc<ConditionalNamingService> {
        Arc::clone(&self.naming_service)
    }

    /// Scene names for everything.
    pub fn scene_naming_service(&self) -> Arc<ConditionalNamingService> {
        Arc::clone(&self.scene_naming_service)
    }

    /// Plain names reduced to their lowercase matching form.
    pub fn normalizing_naming_service(&self) -> Arc<dyn NamingService> {
        Arc::new(DecoratingNamingService::new(
            self.naming_service(),
            matching_formatter(),
        ))
    }

    /// Stored literal names where present, computed names otherwise.
    pub fn literal_first_naming_service(&self) -> Arc<dyn NamingService> {
        Arc::new(DelegatingNamingService::new(vec![
            Arc::new(LiteralNamingService),
            self.naming_service(),
        ]))
    }
}

/// Name `candidate` with the shared default naming service.
pub fn name(candidate: &Entity) -> scenename_core::Result<String> {
    NamingDefaults::shared()
        .naming_service()
        .name(candidate, &Default::default())
}
