//! Encoder and decoder behind one handle.

use std::sync::Arc;

use tracing::debug;

use scenename_core::{ConfigError, Entity, Result};
use scenename_naming::{NamingDefaults, NamingParams, NamingService};
use scenename_parsing::{Parsable, ParsingDefaults, ParsingService, ParsingServiceExt};

use crate::config::Config;

/// Names entities and parses names, both configured from one [`Config`].
///
/// Cloning is cheap: the services are shared.
#[derive(Clone)]
pub struct Codec {
    naming: Arc<dyn NamingService>,
    parsing: Arc<dyn ParsingService>,
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").finish_non_exhaustive()
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::shared()
    }
}

impl Codec {
    /// Build the services for `config`.
    ///
    /// The default configuration reuses the process-wide services instead
    /// of compiling a second grammar.
    pub fn new(config: &Config) -> std::result::Result<Self, ConfigError> {
        if *config == Config::default() {
            return Ok(Self::shared());
        }
        let naming = NamingDefaults::new(&config.naming)?;
        let parsing = ParsingDefaults::new(&config.parsing)?;
        debug!(
            extra_tags = config.parsing.extra_tags.len(),
            extra_languages = config.parsing.extra_languages.len(),
            "codec configured"
        );
        Ok(Self {
            naming: naming.naming_service(),
            parsing: parsing.parsing_service(),
        })
    }

    /// The codec over the shared default services.
    pub fn shared() -> Self {
        Self {
            naming: NamingDefaults::shared().naming_service(),
            parsing: ParsingDefaults::shared().parsing_service(),
        }
    }

    /// Assemble a codec from existing services.
    pub fn from_services(naming: Arc<dyn NamingService>, parsing: Arc<dyn ParsingService>) -> Self {
        Self { naming, parsing }
    }

    pub fn naming_service(&self) -> Arc<dyn NamingService> {
        Arc::clone(&self.naming)
    }

    pub fn parsing_service(&self) -> Arc<dyn ParsingService> {
        Arc::clone(&self.parsing)
    }

    /// The canonical name of `entity`.
    pub fn encode(&self, entity: &Entity) -> Result<String> {
        self.naming.name(entity, &NamingParams::new())
    }

    pub fn encode_with(&self, entity: &Entity, params: &NamingParams) -> Result<String> {
        self.naming.name(entity, params)
    }

    pub fn decode(&self, text: &str) -> Result<Entity> {
        self.parsing.parse(text)
    }

    /// Decode `text` as a `T`, e.g. a [`Release`](scenename_core::Release).
    pub fn decode_as<T: Parsable>(&self, text: &str) -> Result<T> {
        self.parsing.parse_as(text)
    }

    /// Decode `text` and encode the result again.
    pub fn rename(&self, text: &str) -> Result<String> {
        let entity = self.decode(text)?;
        self.encode(&entity)
    }
}

#[cfg(test)]
mod tests {
    use scenename_core::{Episode, Error, Release, Series};
    use scenename_naming::params::keys;
    use scenename_naming::NamingConfig;
    use scenename_parsing::ParsingConfig;

    use super::*;

    #[test]
    fn encodes_and_decodes() {
        let codec = Codec::shared();
        let release = Release::new(Episode::seasoned(Series::new("Psych"), 8, 1))
            .with_tags(["HDTV", "x264"])
            .with_group("EXCELLENCE");
        let name = codec.encode(&Entity::from(release.clone())).unwrap();
        assert_eq!(name, "Psych.S08E01.HDTV.x264-EXCELLENCE");

        let decoded: Release = codec.decode_as(&name).unwrap();
        assert_eq!(decoded, release.with_name(name));
    }

    #[test]
    fn rename_canonicalizes() {
        let codec = Codec::default();
        assert_eq!(codec.rename("psych s08e01").unwrap(), "psych S08E01");
        assert_eq!(
            codec.rename("Psych_S08E01_HDTV_x264-EXCELLENCE").unwrap(),
            "Psych.S08E01.HDTV.x264-EXCELLENCE"
        );
        assert!(matches!(codec.rename(""), Err(Error::NoMatch { .. })));
    }

    #[test]
    fn encode_with_params() {
        let codec = Codec::shared();
        let episode = Episode::seasoned(Series::new("Psych").with_year(2006), 8, 1);
        let params = NamingParams::new().with(keys::INCLUDE_YEAR, false);
        assert_eq!(
            codec.encode_with(&Entity::from(episode), &params).unwrap(),
            "Psych S08E01"
        );
    }

    #[test]
    fn naming_config_changes_output() {
        let config = Config {
            naming: NamingConfig::builder().range_separator("~").build(),
            ..Config::default()
        };
        let codec = Codec::new(&config).unwrap();
        assert_eq!(codec.rename("Psych S08E01-E03").unwrap(), "Psych S08E01~E03");
    }

    #[test]
    fn parsing_config_adds_tags() {
        let default = Codec::shared().decode("Show.S01E01.NORDiC").unwrap();
        assert!(matches!(default, Entity::Episode(_)));

        let config = Config {
            parsing: ParsingConfig::builder().extra_tag("NORDiC").build(),
            ..Config::default()
        };
        let codec = Codec::new(&config).unwrap();
        let release: Release = codec.decode_as("Show.S01E01.NORDiC").unwrap();
        assert_eq!(release.tags.len(), 1);
        assert!(release.group.is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = Config {
            naming: NamingConfig::builder().number_width(0).build(),
            ..Config::default()
        };
        assert!(Codec::new(&config).is_err());
    }
}
