//! The default scene name grammar.
//!
//! Every name starts with a media fragment (`Name[.Year].S08E01`,
//! `Name.2014.01.15`, `Name.Year`, ...). Release patterns extend a media
//! fragment with a tags-and-group suffix, and subtitle patterns extend a
//! release or media pattern with a language, tags and group suffix. Words
//! may be separated by dots, underscores or whitespace.

use scenename_core::property::{episode, movie, release, season, series, subtitle};
use scenename_core::{ConfigError, PropertyKey};

use crate::config::ParsingConfig;
use crate::matcher::PatternMatcher;
use crate::vocab::{FLAGS, KNOWN_TAGS, LanguageConverter, alternation};

/// Word separator.
const SEP: &str = r"[\s._]";

/// Optional year after a series name, as `.2005` or `.(2005)`.
const SERIES_YEAR: &str = r"(?:[\s._]\(?(\d{4})\)?)?";

/// One or more episode numbers: `E01`, `E01-E03`, `E01+E02`, `E01E02`.
const EPISODE_NUMBERS: &str = r"((?i:E)\d{1,3}(?:[-+]?(?i:E)\d{1,3})*)";

/// The media shapes a name can start with, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaShape {
    SeasonedEpisode,
    DatedEpisode,
    MiniSeriesEpisode,
    Season,
    Movie,
    Series,
}

impl MediaShape {
    pub const ALL: [MediaShape; 6] = [
        MediaShape::SeasonedEpisode,
        MediaShape::DatedEpisode,
        MediaShape::MiniSeriesEpisode,
        MediaShape::Season,
        MediaShape::Movie,
        MediaShape::Series,
    ];

    pub const EPISODES: [MediaShape; 3] = [
        MediaShape::SeasonedEpisode,
        MediaShape::DatedEpisode,
        MediaShape::MiniSeriesEpisode,
    ];

    pub fn is_episode(self) -> bool {
        matches!(
            self,
            MediaShape::SeasonedEpisode | MediaShape::DatedEpisode | MediaShape::MiniSeriesEpisode
        )
    }

    /// The key a trailing title is captured under, if the shape has one.
    fn title_key(self) -> Option<PropertyKey> {
        match self {
            MediaShape::SeasonedEpisode
            | MediaShape::DatedEpisode
            | MediaShape::MiniSeriesEpisode => Some(episode::TITLE),
            MediaShape::Season => Some(season::TITLE),
            MediaShape::Movie | MediaShape::Series => None,
        }
    }

    /// The bare media fragment, without title, tags or group.
    pub fn fragment(self) -> Result<PatternMatcher, ConfigError> {
        match self {
            MediaShape::SeasonedEpisode => PatternMatcher::with_keys(
                format!(r"(.+?){SERIES_YEAR}{SEP}(?i:S)(\d{{1,3}}){EPISODE_NUMBERS}"),
                &[series::NAME, series::YEAR, season::NUMBER, episode::NUMBER_IN_SEASON],
            ),
            MediaShape::DatedEpisode => PatternMatcher::with_keys(
                format!(r"(.+?){SERIES_YEAR}{SEP}(\d{{4}}[\s._-]\d{{2}}[\s._-]\d{{2}})"),
                &[series::NAME, series::YEAR, episode::DATE],
            ),
            MediaShape::MiniSeriesEpisode => PatternMatcher::with_keys(
                format!(r"(.+?){SERIES_YEAR}{SEP}{EPISODE_NUMBERS}"),
                &[series::NAME, series::YEAR, episode::NUMBER_IN_SERIES],
            ),
            MediaShape::Season => PatternMatcher::with_keys(
                format!(r"(.+?){SERIES_YEAR}{SEP}(?i:S)(\d{{1,3}})"),
                &[series::NAME, series::YEAR, season::NUMBER],
            ),
            MediaShape::Movie => PatternMatcher::with_keys(
                format!(r"(.+?){SEP}\(?((?:18|19|20)\d{{2}})\)?"),
                &[movie::NAME, movie::YEAR],
            ),
            MediaShape::Series => PatternMatcher::with_keys(
                format!(r"(.+?)(?:{SEP}\(?((?:18|19|20)\d{{2}})\)?)?"),
                &[series::NAME, series::YEAR],
            ),
        }
    }

    /// The media fragment followed by an optional title.
    pub fn matcher(self) -> Result<PatternMatcher, ConfigError> {
        let fragment = self.fragment()?;
        match self.title_key() {
            Some(key) => fragment.extend("", &[], &format!("(?:{SEP}(.+))?"), &[key]),
            None => Ok(fragment),
        }
    }
}

/// The tags-and-group endings of a release name, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseSuffix {
    /// `.[PROPER.]HDTV.x264-GROUP`: tags start with a known tag.
    Tagged,
    /// `.PROPER.Title.HDTV.x264-GROUP`: flags, an episode title, then tags.
    FlaggedTitle,
    /// `.Title.HDTV.x264-GROUP`.
    Titled,
    /// `.anything-GROUP`.
    Any,
    /// `.HDTV.x264` without a group.
    Ungrouped,
}

impl ReleaseSuffix {
    pub const ALL: [ReleaseSuffix; 5] = [
        ReleaseSuffix::Tagged,
        ReleaseSuffix::FlaggedTitle,
        ReleaseSuffix::Titled,
        ReleaseSuffix::Any,
        ReleaseSuffix::Ungrouped,
    ];

    /// Titles only follow episodes. A bare series name is only followed by
    /// tag lists that start with a known tag.
    pub fn applies_to(self, shape: MediaShape) -> bool {
        match self {
            ReleaseSuffix::FlaggedTitle | ReleaseSuffix::Titled => shape.is_episode(),
            ReleaseSuffix::Any => shape != MediaShape::Series,
            ReleaseSuffix::Tagged | ReleaseSuffix::Ungrouped => true,
        }
    }
}

/// Pattern builder for the default grammar.
///
/// Known tags and flags match case-insensitively; language tokens match
/// exactly, so `German` names a subtitle language while `GERMAN` is a
/// release tag.
#[derive(Debug, Clone)]
pub struct Grammar {
    known: String,
    flags: String,
    languages: String,
}

impl Grammar {
    pub fn new(config: &ParsingConfig, languages: &LanguageConverter) -> Self {
        let known = alternation(
            KNOWN_TAGS
                .iter()
                .map(|tag| -> &str { tag })
                .chain(config.extra_tags.iter().map(String::as_str)),
        );
        let tokens = languages.tokens();
        Self {
            known,
            flags: alternation(FLAGS.iter().copied()),
            languages: alternation(tokens.iter().map(String::as_str)),
        }
    }

    fn tag_list(&self) -> String {
        let (known, flags) = (&self.known, &self.flags);
        format!(r"(?:(?i:{flags}){SEP})*(?i:{known})(?:{SEP}.*)?")
    }

    fn suffix(&self, suffix: ReleaseSuffix) -> (String, Vec<PropertyKey>) {
        let (known, flags) = (&self.known, &self.flags);
        match suffix {
            ReleaseSuffix::Tagged => (
                format!(r"{SEP}({})-(\w+)", self.tag_list()),
                vec![release::TAGS, release::GROUP],
            ),
            ReleaseSuffix::FlaggedTitle => {
                let flag_run = format!(r"(?i:{flags})(?:{SEP}(?i:{flags}))*");
                (
                    format!(r"{SEP}({flag_run}){SEP}(.+?){SEP}((?i:{known})(?:{SEP}.*)?)-(\w+)"),
                    vec![release::TAGS, episode::TITLE, release::TAGS, release::GROUP],
                )
            }
            ReleaseSuffix::Titled => (
                format!(r"{SEP}(.+?){SEP}((?i:{known})(?:{SEP}.*)?)-(\w+)"),
                vec![episode::TITLE, release::TAGS, release::GROUP],
            ),
            ReleaseSuffix::Any => (
                format!(r"{SEP}(.+)-(\w+)"),
                vec![release::TAGS, release::GROUP],
            ),
            ReleaseSuffix::Ungrouped => (
                format!(r"{SEP}({})", self.tag_list()),
                vec![release::TAGS],
            ),
        }
    }

    /// Standalone media matchers for `shapes`, each with an optional title.
    pub fn media_matchers(
        &self,
        shapes: &[MediaShape],
    ) -> Result<Vec<PatternMatcher>, ConfigError> {
        shapes.iter().map(|shape| shape.matcher()).collect()
    }

    /// Release matchers: every media shape with every applicable suffix.
    ///
    /// The whole match is captured as `release.name`.
    pub fn release_matchers(&self) -> Result<Vec<PatternMatcher>, ConfigError> {
        let mut matchers = Vec::new();
        for shape in MediaShape::ALL {
            let fragment = shape.fragment()?;
            for suffix in ReleaseSuffix::ALL {
                if !suffix.applies_to(shape) {
                    continue;
                }
                let (pattern, keys) = self.suffix(suffix);
                let matcher = fragment
                    .extend("", &[], &pattern, &keys)?
                    .map_group(0, release::NAME)?;
                matchers.push(matcher);
            }
        }
        Ok(matchers)
    }

    fn language_suffix(&self) -> String {
        format!(r"{SEP}({})(?:{SEP}([^-]+))?-(\w+)", self.languages)
    }

    /// Subtitle matchers: every release matcher followed by
    /// `.Language[.Tags]-Group`, then every media fragment followed by the
    /// same.
    ///
    /// The whole match is captured as `subtitle.name`.
    pub fn subtitle_matchers(&self) -> Result<Vec<PatternMatcher>, ConfigError> {
        let suffix = self.language_suffix();
        let keys = [subtitle::LANGUAGE, subtitle::TAGS, subtitle::GROUP];
        let mut matchers = Vec::new();
        for release_matcher in self.release_matchers()? {
            matchers.push(
                release_matcher
                    .extend("", &[], &suffix, &keys)?
                    .map_group(0, subtitle::NAME)?,
            );
        }
        for shape in MediaShape::ALL {
            matchers.push(
                shape
                    .fragment()?
                    .extend("", &[], &suffix, &keys)?
                    .map_group(0, subtitle::NAME)?,
            );
        }
        Ok(matchers)
    }

    /// Subtitle matchers for names that carry no language, such as the
    /// files of a source that only publishes one language.
    ///
    /// Matches `Media[.Tags]-Group` and reports `language` as the subtitle
    /// language.
    pub fn fixed_language_subtitle_matchers(
        &self,
        language: &str,
    ) -> Result<Vec<PatternMatcher>, ConfigError> {
        let suffix = format!(r"(?:{SEP}([^-]+))?-(\w+)");
        MediaShape::ALL
            .iter()
            .map(|shape| {
                Ok(shape
                    .fragment()?
                    .extend("", &[], &suffix, &[subtitle::TAGS, subtitle::GROUP])?
                    .map_group(0, subtitle::NAME)?
                    .with_predefined(subtitle::LANGUAGE, language))
            })
            .collect()
    }
}
