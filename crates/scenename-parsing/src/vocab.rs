//! Built-in release vocabulary: known tags, flags and subtitle languages.

use std::collections::BTreeMap;

use phf::{phf_map, phf_set};

use scenename_core::convert::{Converter, Value, ValueKind};
use scenename_core::ConversionError;

/// Tags that may start the tag list of a release name.
pub static KNOWN_TAGS: phf::Set<&'static str> = phf_set! {
    // sources
    "HDTV", "PDTV", "SDTV", "DSR", "WEB", "WEB-DL", "WEBRip", "WEB-Rip", "BluRay", "BDRip",
    "BRRip", "DVDRip", "DVDR", "DVD", "HDRip", "UHD", "REMUX", "AMZN", "NF", "HMAX", "DSNP",
    // resolutions
    "480p", "576p", "720p", "1080p", "1080i", "2160p", "4K",
    // codecs
    "x264", "x265", "H264", "H.264", "H265", "H.265", "HEVC", "AVC", "XviD", "DivX", "10bit",
    // audio
    "AAC", "AC3", "DD5.1", "DDP5.1", "DTS", "DTS-HD", "TrueHD", "Atmos", "FLAC", "MP3",
    // dubs and editions
    "GERMAN", "FRENCH", "ITALIAN", "SPANISH", "DUBBED", "SUBBED", "MULTi", "DL", "EXTENDED",
    "UNRATED", "REMASTERED", "LIMITED", "iNTERNAL", "COMPLETE",
};

/// Release flags that may precede an episode title.
pub static FLAGS: phf::Set<&'static str> = phf_set! {
    "PROPER", "REPACK", "REAL", "RERIP", "INTERNAL", "DIRFIX", "NFOFIX", "READNFO",
};

/// Subtitle language codes, lowercase, mapped to the language name.
pub static LANGUAGE_CODES: phf::Map<&'static str, &'static str> = phf_map! {
    "de" => "German", "ger" => "German", "deu" => "German", "deutsch" => "German",
    "en" => "English", "eng" => "English",
    "fr" => "French", "fre" => "French", "fra" => "French",
    "es" => "Spanish", "spa" => "Spanish",
    "ita" => "Italian",
    "nl" => "Dutch", "dut" => "Dutch", "nld" => "Dutch",
    "pt" => "Portuguese", "por" => "Portuguese",
    "sv" => "Swedish", "swe" => "Swedish",
    "da" => "Danish", "dan" => "Danish",
    "nor" => "Norwegian",
    "fi" => "Finnish", "fin" => "Finnish",
    "pl" => "Polish", "pol" => "Polish",
    "ru" => "Russian", "rus" => "Russian",
    "tr" => "Turkish", "tur" => "Turkish",
    "ja" => "Japanese", "jpn" => "Japanese",
};

/// A regex alternation of `tokens`, longest first, each escaped.
pub fn alternation<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    let mut tokens: Vec<&str> = tokens.into_iter().collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    tokens.dedup();
    tokens
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

/// Maps subtitle language tokens such as `de`, `ger` or `German` to the
/// language name.
///
/// Language names are matched exactly; codes are matched ignoring case.
#[derive(Debug, Clone, Default)]
pub struct LanguageConverter {
    extra: BTreeMap<String, String>,
}

impl LanguageConverter {
    pub fn new(extra: BTreeMap<String, String>) -> Self {
        let extra = extra
            .into_iter()
            .map(|(token, language)| (token.to_lowercase(), language))
            .collect();
        Self { extra }
    }

    /// The tokens this converter recognizes, as they appear in names.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = LANGUAGE_CODES.values().map(|v| v.to_string()).collect();
        tokens.extend(LANGUAGE_CODES.keys().map(|k| k.to_string()));
        tokens.extend(self.extra.values().cloned());
        tokens.extend(self.extra.keys().cloned());
        tokens.sort();
        tokens.dedup();
        tokens
    }

    pub fn language(&self, token: &str) -> Option<String> {
        let token = token.trim();
        let is_name = LANGUAGE_CODES.values().any(|v| *v == token)
            || self.extra.values().any(|v| v == token);
        if is_name {
            return Some(token.to_string());
        }
        let lower = token.to_lowercase();
        self.extra
            .get(&lower)
            .cloned()
            .or_else(|| LANGUAGE_CODES.get(lower.as_str()).map(|v| v.to_string()))
    }
}

impl Converter for LanguageConverter {
    fn to_text(&self, value: &Value) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }

    fn from_text(&self, text: &str, _kind: ValueKind) -> Result<Value, ConversionError> {
        self.language(text)
            .map(Value::Text)
            .ok_or_else(|| ConversionError::new(text, "unknown language"))
    }
}
