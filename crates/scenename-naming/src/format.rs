//! Whole-name formatters applied once a name is complete.

use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A post-processing function applied to a finished name.
pub type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Canonical scene formatting.
///
/// Strips diacritics, spells out `&`, drops apostrophes and collapses every
/// run of other punctuation or whitespace to a single `.`, or to `-` if the
/// run contains a dash. Leading and trailing separators are removed.
/// Applying it twice gives the same result as applying it once.
///
/// ```
/// use scenename_naming::format::scene_format;
///
/// assert_eq!(scene_format("Grey's Anatomy S10E01"), "Greys.Anatomy.S10E01");
/// assert_eq!(scene_format("Law & Order: SVU"), "Law.and.Order.SVU");
/// ```
pub fn scene_format(name: &str) -> String {
    let text = strip_diacritics(name).replace('&', " and ");
    let mut out = String::with_capacity(text.len());
    let mut pending: Option<char> = None;
    for c in text.chars() {
        if is_apostrophe(c) {
            continue;
        }
        if c.is_ascii_alphanumeric() || c == '+' || c == '_' {
            if let Some(sep) = pending.take() {
                if !out.is_empty() {
                    out.push(sep);
                }
            }
            out.push(c);
        } else if c == '-' {
            pending = Some('-');
        } else if pending.is_none() {
            pending = Some('.');
        }
    }
    out
}

/// Lowercase, diacritic-free form used to compare names.
///
/// Every run of characters that are not letters or digits becomes a single
/// space.
pub fn normalize_for_matching(name: &str) -> String {
    let text = strip_diacritics(&name.to_lowercase());
    let mut out = String::with_capacity(text.len());
    let mut pending = false;
    for c in text.chars() {
        if is_apostrophe(c) {
            continue;
        }
        if c.is_alphanumeric() {
            if pending && !out.is_empty() {
                out.push(' ');
            }
            pending = false;
            out.push(c);
        } else {
            pending = true;
        }
    }
    out
}

pub fn scene_formatter() -> Formatter {
    Arc::new(scene_format)
}

pub fn matching_formatter() -> Formatter {
    Arc::new(normalize_for_matching)
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{00b4}' | '`')
}

fn strip_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        match c {
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'ø' => out.push('o'),
            'Ø' => out.push('O'),
            'ł' => out.push('l'),
            'Ł' => out.push('L'),
            'đ' => out.push('d'),
            'Đ' => out.push('D'),
            _ => out.push(c),
        }
    }
    out
}
