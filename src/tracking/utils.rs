//! Shared text helpers for the tracking modules.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Compiles a regex at static init; panics on invalid pattern.
pub fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r"&(?:#[xX]([0-9a-fA-F]{1,16});?|#([0-9]{1,16});?|([A-Za-z][A-Za-z0-9]{0,31})(;?))",
    )
});

/// Named entities decoded when terminated by `;`.
///
/// Entries flagged `true` are legacy names that browsers also decode without
/// the trailing semicolon (`&nbsp`, `&copy2026`).
const NAMED_ENTITIES: &[(&str, char, bool)] = &[
    ("amp", '&', true),
    ("lt", '<', true),
    ("gt", '>', true),
    ("quot", '"', true),
    ("apos", '\'', false),
    ("nbsp", '\u{00a0}', true),
    ("shy", '\u{00ad}', true),
    ("copy", '\u{00a9}', true),
    ("reg", '\u{00ae}', true),
    ("deg", '\u{00b0}', true),
    ("plusmn", '\u{00b1}', true),
    ("micro", '\u{00b5}', true),
    ("para", '\u{00b6}', true),
    ("sect", '\u{00a7}', true),
    ("middot", '\u{00b7}', true),
    ("laquo", '\u{00ab}', true),
    ("raquo", '\u{00bb}', true),
    ("times", '\u{00d7}', true),
    ("divide", '\u{00f7}', true),
    ("cent", '\u{00a2}', true),
    ("pound", '\u{00a3}', true),
    ("yen", '\u{00a5}', true),
    ("frac12", '\u{00bd}', true),
    ("frac14", '\u{00bc}', true),
    ("frac34", '\u{00be}', true),
    ("ndash", '\u{2013}', false),
    ("mdash", '\u{2014}', false),
    ("lsquo", '\u{2018}', false),
    ("rsquo", '\u{2019}', false),
    ("sbquo", '\u{201a}', false),
    ("ldquo", '\u{201c}', false),
    ("rdquo", '\u{201d}', false),
    ("bdquo", '\u{201e}', false),
    ("bull", '\u{2022}', false),
    ("hellip", '\u{2026}', false),
    ("lsaquo", '\u{2039}', false),
    ("rsaquo", '\u{203a}', false),
    ("euro", '\u{20ac}', false),
    ("trade", '\u{2122}', false),
    ("larr", '\u{2190}', false),
    ("rarr", '\u{2192}', false),
    ("ensp", '\u{2002}', false),
    ("emsp", '\u{2003}', false),
    ("thinsp", '\u{2009}', false),
];

/// Windows-1252 characters for the C1 range `&#128;`..`&#159;`, as browsers decode them.
const WINDOWS_1252_C1: [char; 32] = [
    '\u{20ac}', '\u{81}', '\u{201a}', '\u{0192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02c6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8d}', '\u{017d}', '\u{8f}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02dc}', '\u{2122}', '\u{0161}', '\u{203a}', '\u{0153}', '\u{9d}', '\u{017e}', '\u{0178}',
];

/// Collapses every whitespace run to a single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits text on every Unicode line boundary, not just `\n`.
///
/// A `\r\n` pair yields an empty segment between the two breaks.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| {
        matches!(
            ch,
            '\n' | '\r'
                | '\u{0b}'
                | '\u{0c}'
                | '\u{1c}'
                | '\u{1d}'
                | '\u{1e}'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        )
    })
}

/// Decodes HTML character references the way browsers do.
///
/// Decimal and hex references are decoded with the Windows-1252 remap for
/// `&#128;`..`&#159;`; invalid code points become U+FFFD. Named entities come
/// from `NAMED_ENTITIES`. Unknown names are left untouched. Decoding is a
/// single pass, so `&amp;lt;` becomes `&lt;`, not `<`.
#[must_use]
pub fn html_unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    ENTITY_RE
        .replace_all(value, |caps: &Captures<'_>| {
            if let Some(hex) = caps.get(1) {
                return decode_code_point(u32::from_str_radix(hex.as_str(), 16).ok()).to_string();
            }
            if let Some(dec) = caps.get(2) {
                return decode_code_point(dec.as_str().parse::<u32>().ok()).to_string();
            }
            let name = caps.get(3).map_or("", |m| m.as_str());
            let terminated = caps.get(4).is_some_and(|m| !m.as_str().is_empty());
            decode_named(name, terminated).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_code_point(code: Option<u32>) -> char {
    match code {
        Some(0) | None => char::REPLACEMENT_CHARACTER,
        Some(code @ 0x80..=0x9f) => WINDOWS_1252_C1[(code - 0x80) as usize],
        Some(code) => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}

fn decode_named(name: &str, terminated: bool) -> Option<String> {
    if terminated
        && let Some((_, ch, _)) = NAMED_ENTITIES.iter().find(|(entity, _, _)| *entity == name)
    {
        return Some(ch.to_string());
    }

    // Longest legacy name that prefixes the run, e.g. `&copy2026` or `&ampx;`.
    let (entity, ch, _) = NAMED_ENTITIES
        .iter()
        .filter(|(entity, _, legacy)| *legacy && name.starts_with(entity))
        .max_by_key(|(entity, _, _)| entity.len())?;
    let mut decoded = String::with_capacity(name.len() + 1);
    decoded.push(*ch);
    decoded.push_str(&name[entity.len()..]);
    if terminated {
        decoded.push(';');
    }
    Some(decoded)
}
