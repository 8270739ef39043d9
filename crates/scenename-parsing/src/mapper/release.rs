use std::sync::Arc;

use scenename_core::property::{release, subtitle};
use scenename_core::{
    ConverterService, EntityKind, MappingError, PropertyMap, Release, SubtitleRelease,
};

use super::{Fields, MediaMapper, Mapper};

/// Maps `release.*` properties plus the release's media.
///
/// The literal name, usually the whole matched text, is kept verbatim.
#[derive(Debug, Clone)]
pub struct ReleaseMapper {
    converters: Arc<ConverterService>,
    media: MediaMapper,
}

impl ReleaseMapper {
    pub fn new(converters: Arc<ConverterService>) -> Self {
        Self {
            media: MediaMapper::new(Arc::clone(&converters), EntityKind::Release),
            converters,
        }
    }
}

impl Mapper<Release> for ReleaseMapper {
    fn map(&self, properties: &PropertyMap) -> Result<Release, MappingError> {
        let fields = Fields::new(properties, &self.converters, EntityKind::Release);
        Ok(Release {
            name: properties.get_non_blank(release::NAME).map(str::to_string),
            media: self.media.map(properties)?,
            tags: fields.tags(release::TAGS)?,
            group: fields.group(release::GROUP)?,
        })
    }
}

/// Maps `subtitle.*` properties.
///
/// When release tags or a release group were matched, the subtitles are
/// taken to match that release and cover its media. Otherwise only the
/// media is known.
#[derive(Debug, Clone)]
pub struct SubtitleReleaseMapper {
    converters: Arc<ConverterService>,
    release: ReleaseMapper,
    media: MediaMapper,
}

impl SubtitleReleaseMapper {
    pub fn new(converters: Arc<ConverterService>) -> Self {
        Self {
            release: ReleaseMapper::new(Arc::clone(&converters)),
            media: MediaMapper::new(Arc::clone(&converters), EntityKind::SubtitleRelease),
            converters,
        }
    }
}

impl Mapper<SubtitleRelease> for SubtitleReleaseMapper {
    fn map(&self, properties: &PropertyMap) -> Result<SubtitleRelease, MappingError> {
        let fields = Fields::new(properties, &self.converters, EntityKind::SubtitleRelease);

        let (media, matching_releases) =
            if fields.has(release::TAGS) || fields.has(release::GROUP) {
                let matched = self.release.map(properties)?;
                (matched.media.clone(), vec![matched])
            } else {
                (self.media.map(properties)?, Vec::new())
            };

        Ok(SubtitleRelease {
            name: properties.get_non_blank(subtitle::NAME).map(str::to_string),
            media,
            language: fields.text(subtitle::LANGUAGE)?,
            tags: fields.tags(subtitle::TAGS)?,
            group: fields.group(subtitle::GROUP)?,
            matching_releases,
        })
    }
}
