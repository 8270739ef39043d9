use std::sync::Arc;

use scenename_core::property::subtitle;
use scenename_core::{Release, Result, SubtitleRelease};

use super::{Namer, ReleaseNamer};
use crate::builder::{NameBuilder, NameStyle};
use crate::params::{NamingParams, keys};

/// `Release.Language.Tags-GROUP`, e.g.
/// `Psych.S08E01.HDTV.x264-EXCELLENCE.German-SubCentral`.
///
/// The release part comes from [`keys::EXPLICIT_RELEASE`] if given, else
/// from the only matching release. Subtitles matching zero or several
/// releases are named after their media.
#[derive(Debug, Clone)]
pub struct SubtitleReleaseNamer {
    style: NameStyle,
    release: Arc<ReleaseNamer>,
}

impl SubtitleReleaseNamer {
    pub fn new(style: NameStyle, release: Arc<ReleaseNamer>) -> Self {
        Self { style, release }
    }

    fn base_release<'a>(
        candidate: &'a SubtitleRelease,
        params: &'a NamingParams,
    ) -> Option<&'a Release> {
        params
            .release(keys::EXPLICIT_RELEASE)
            .or(match candidate.matching_releases.as_slice() {
                [only] => Some(only),
                _ => None,
            })
    }
}

impl Namer<SubtitleRelease> for SubtitleReleaseNamer {
    fn style(&self) -> &NameStyle {
        &self.style
    }

    fn build_name(
        &self,
        builder: &mut NameBuilder<'_>,
        candidate: &SubtitleRelease,
        params: &NamingParams,
    ) -> Result<()> {
        if params.bool(keys::PREFER_LITERAL_NAME, false) {
            if let Some(name) = &candidate.name {
                builder.append(subtitle::NAME, name)?;
                return Ok(());
            }
        }
        match Self::base_release(candidate, params) {
            Some(release) => self.release.build_name(builder, release, params)?,
            None => self.release.build_media(builder, &candidate.media, params)?,
        }
        builder.append_opt(subtitle::LANGUAGE, candidate.language.as_deref())?;
        if !candidate.tags.is_empty() {
            builder.append(subtitle::TAGS, candidate.tags.as_slice())?;
        }
        builder.append_opt(subtitle::GROUP, candidate.group.as_ref())?;
        Ok(())
    }
}
