//! Raw-text normalization ahead of tokenization.
//!
//! Course descriptions are scraped from web pages and occasionally carry HTML
//! fragments. Normalization lowercases, applies NFC (so composed and
//! decomposed accent encodings compare equal), strips tags and entities, and
//! collapses whitespace. Accented letters are preserved throughout; the
//! analyzer is accent-sensitive by design.

use unicode_normalization::UnicodeNormalization;

/// Normalizes raw field or query text.
///
/// Applies, in order: lowercasing, NFC Unicode normalization, HTML tag
/// removal (`<…>`), HTML entity removal (`&name;`, `&#nnn;`), whitespace
/// collapsing, and trimming.
#[must_use]
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lowered: String = text.to_lowercase().nfc().collect();
    let stripped = strip_tags(&lowered);
    let unescaped = strip_entities(&stripped);
    collapse_whitespace(&unescaped)
}

/// Replaces any character outside the Unicode letter/number classes with a
/// space and inserts a space at every letter↔digit boundary, so that
/// `"gti320"` splits into `"gti 320"`. Accented letters survive the mask.
#[must_use]
pub fn mask_and_split_boundaries(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if let Some(p) = prev
                && ((p.is_alphabetic() && c.is_numeric())
                    || (p.is_numeric() && c.is_alphabetic()))
            {
                out.push(' ');
            }
            out.push(c);
            prev = Some(c);
        } else {
            out.push(' ');
            prev = None;
        }
    }
    out
}

/// Removes complete HTML tags. An unterminated `<` is kept as-is.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            // `<>` carries no tag name; keep it like any stray punctuation.
            Some(0) => {
                out.push_str("<>");
                rest = &after[1..];
            }
            Some(close) => {
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Replaces named (`&eacute;`) and numeric (`&#233;`) HTML entities with a
/// single space. Anything not matching the entity shape is kept verbatim.
fn strip_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match entity_body_len(after) {
            Some(body) => {
                out.push(' ');
                rest = &after[body + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length of a valid entity body (`name` or `#123`) when `s` starts with one
/// terminated by `;`.
fn entity_body_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let digits = bytes.first() == Some(&b'#');
    let start = usize::from(digits);
    let mut len = start;
    for &b in &bytes[start..] {
        if b == b';' {
            return (len > start).then_some(len);
        }
        let valid = if digits {
            b.is_ascii_digit()
        } else {
            b.is_ascii_alphabetic()
        };
        if !valid {
            return None;
        }
        len += 1;
    }
    None
}

/// Collapses runs of whitespace to single spaces and trims the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
