//! Release, subtitle release, tag and group records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::Media;

/// A single release tag such as `HDTV`, `x264` or `720p`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a list of tags from string slices.
    pub fn list<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<Tag> {
        names.into_iter().map(Tag::new).collect()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A release or subtitle group such as `EXCELLENCE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(pub String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scene release of one or more media items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Release {
    /// The literal release name as published, if known.
    pub name: Option<String>,
    pub media: Vec<Media>,
    pub tags: Vec<Tag>,
    pub group: Option<Group>,
}

impl Release {
    pub fn new(media: impl Into<Media>) -> Self {
        Self {
            media: vec![media.into()],
            ..Default::default()
        }
    }

    pub fn with_tags<'a>(mut self, tags: impl IntoIterator<Item = &'a str>) -> Self {
        self.tags = Tag::list(tags);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(Group::new(group));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A subtitle release for one or more media items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubtitleRelease {
    /// The literal name as published, if known.
    pub name: Option<String>,
    pub media: Vec<Media>,
    pub language: Option<String>,
    pub tags: Vec<Tag>,
    pub group: Option<Group>,
    /// Releases whose video the subtitles are synchronized to.
    pub matching_releases: Vec<Release>,
}

impl SubtitleRelease {
    /// Subtitles matching exactly one release, covering its media.
    pub fn for_release(release: Release, language: impl Into<String>) -> Self {
        Self {
            media: release.media.clone(),
            language: Some(language.into()),
            matching_releases: vec![release],
            ..Default::default()
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(Group::new(group));
        self
    }

    pub fn with_tags<'a>(mut self, tags: impl IntoIterator<Item = &'a str>) -> Self {
        self.tags = Tag::list(tags);
        self
    }
}
