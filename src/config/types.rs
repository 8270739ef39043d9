use serde::{Deserialize, Serialize};

use scenename_naming::NamingConfig;
use scenename_parsing::ParsingConfig;

/// Top-level configuration file.
///
/// ```toml
/// [naming]
/// range_separator = "-"
/// number_width = 2
///
/// [parsing]
/// extra_tags = ["NORDiC"]
///
/// [parsing.extra_languages]
/// sv = "Swedish"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub parsing: ParsingConfig,
}
