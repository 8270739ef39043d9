use std::sync::Arc;

use scenename_core::property::release;
use scenename_core::{Episode, Group, Media, Release, Result, Tag};

use super::{MediaNamer, MultiEpisodeNamer, Namer};
use crate::builder::{NameBuilder, NameStyle};
use crate::params::{NamingParams, keys};

/// `Media.Tags-GROUP`, e.g. `Psych.S08E01.HDTV.x264-EXCELLENCE`.
///
/// Releases of several episodes name them together through the
/// multi-episode namer. Episode titles are left out unless
/// [`keys::ALWAYS_INCLUDE_TITLE`] is set.
#[derive(Debug, Clone)]
pub struct ReleaseNamer {
    style: NameStyle,
    media: Arc<MediaNamer>,
    multi: Arc<MultiEpisodeNamer>,
}

impl ReleaseNamer {
    pub fn new(style: NameStyle, media: Arc<MediaNamer>, multi: Arc<MultiEpisodeNamer>) -> Self {
        Self {
            style,
            media,
            multi,
        }
    }

    /// Append the media part of a release or subtitle release.
    pub fn build_media(
        &self,
        builder: &mut NameBuilder<'_>,
        media: &[Media],
        params: &NamingParams,
    ) -> Result<()> {
        let media_params = params.with(
            keys::INCLUDE_TITLE,
            params.bool(keys::ALWAYS_INCLUDE_TITLE, false),
        );
        let episodes: Option<Vec<&Episode>> = media.iter().map(Media::as_episode).collect();
        match episodes {
            Some(episodes) if episodes.len() > 1 => {
                self.multi.build_episodes(builder, &episodes, &media_params)
            }
            _ => {
                for item in media {
                    self.media.build_name(builder, item, &media_params)?;
                }
                Ok(())
            }
        }
    }
}

impl Namer<Release> for ReleaseNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Release,
        params: &NamingParams,
    ) -> Result<()> {
        if params.bool(keys::PREFER_LITERAL_NAME, false) {
            if let Some(name) = &candidate.name {
                builder.append(release::NAME, name)?;
                return Ok(());
            }
        }
        self.build_media(builder, &candidate.media, params)?;
        if !candidate.tags.is_empty() {
            builder.append(release::TAGS, candidate.tags.as_slice())?;
        }
        builder.append_opt(release::GROUP, candidate.group.as_ref())?;
        Ok(())
    }
}

/// A single tag on its own.
#[derive(Debug, Clone)]
pub struct TagNamer {
    style: NameStyle,
}

impl TagNamer {
    pub fn new(style: NameStyle) -> Self {
        Self { style }
    }
}

impl Namer<Tag> for TagNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Tag,
        _params: &NamingParams,
    ) -> Result<()> {
        builder.append(release::TAGS, std::slice::from_ref(candidate))?;
        Ok(())
    }
}

/// A group name on its own, without the group separator.
#[derive(Debug, Clone)]
pub struct GroupNamer {
    style: NameStyle,
}

impl GroupNamer {
    pub fn new(style: NameStyle) -> Self {
        Self { style }
    }
}

impl Namer<Group> for GroupNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &Group,
        _params: &NamingParams,
    ) -> Result<()> {
        builder.append(release::GROUP, candidate)?;
        Ok(())
    }
}
