//! Light French suffix stemmer.
//!
//! A full Snowball stemmer is overkill for short academic titles; this
//! reduces the variation that actually shows up in course text (plural
//! endings, `-ation`/`-ement` families, `-aux` → `-al`) without touching
//! short tokens or course-code fragments.

/// Tokens shorter than this are returned unchanged.
const MIN_STEM_LEN: usize = 5;

/// Minimum remaining length for the trailing-`s` rule to apply.
const MIN_PLURAL_LEN: usize = 4;

/// Ordered suffix rewrites, each applied at most once in sequence.
/// The plural form collapses onto its singular; `aux` becomes `al`
/// (nationaux → national).
const SUFFIX_REWRITES: &[(&str, &str)] = &[
    ("ements", "ement"),
    ("ations", "ation"),
    ("iques", "ique"),
    ("eurs", "eur"),
    ("ités", "ité"),
    ("euses", "euse"),
    ("iers", "ier"),
    ("ables", "able"),
    ("ibles", "ible"),
    ("ifs", "if"),
    ("ives", "ive"),
    ("ances", "ance"),
    ("ences", "ence"),
    ("tions", "tion"),
    ("elles", "elle"),
    ("aux", "al"),
];

/// Endings that keep their trailing `s` (the `s` is structural, not plural).
const PLURAL_GUARDS: &[&str] = &["ss", "us", "is", "os"];

/// Stems a single lowercase token.
#[must_use]
pub fn stem(token: &str) -> String {
    if token.chars().count() < MIN_STEM_LEN {
        return token.to_owned();
    }

    let mut word = token.to_owned();
    for (suffix, replacement) in SUFFIX_REWRITES {
        if let Some(stripped) = word.strip_suffix(suffix) {
            word = format!("{stripped}{replacement}");
        }
    }

    if word.chars().count() >= MIN_PLURAL_LEN
        && word.ends_with('s')
        && !PLURAL_GUARDS.iter().any(|guard| word.ends_with(guard))
    {
        word.pop();
    }

    word
}
