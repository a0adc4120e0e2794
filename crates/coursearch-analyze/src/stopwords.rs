//! French stopword filtering.
//!
//! The list combines common French function words with academic filler that
//! appears in nearly every course description ("cours", "permet", "vise",
//! "notions", …) and therefore carries no ranking signal. Filtering runs
//! after stemming, so the effective set is closed under the stemmer: both
//! surface forms and their stems are members.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::stem::stem;

/// Surface-form stopword list.
const BASE_STOPWORDS: &[&str] = &[
    // Articles and prepositions
    "le", "la", "les", "de", "des", "du", "un", "une", "et", "ou", "pour", "par", "dans", "sur",
    "au", "aux", "avec", "en", "à",
    // Demonstratives and relatives
    "ce", "cette", "ces", "que", "qui", "dont", "où", "comme",
    // Quantifiers
    "tout", "tous", "toute", "toutes", "plus", "moins", "très",
    // Common verb forms
    "être", "avoir", "faire", "peut", "peuvent", "sont", "est", "sera", "seront",
    // Academic filler
    "cours", "étudiant", "étudiante", "permet", "vise", "offre", "notions", "présente", "terme",
    "mesure", "travail", "travaux", "introduction", "base", "bases", "principes", "principe",
    "ainsi", "aussi", "entre", "autres", "autre", "même", "mêmes",
];

static STOPWORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    BASE_STOPWORDS
        .iter()
        .flat_map(|word| [(*word).to_owned(), stem(word)])
        .collect()
});

/// Whether a token (surface form or stem) is a stopword. Case-insensitive.
#[must_use]
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_words_are_stopwords() {
        for word in ["le", "des", "dans", "avec", "où"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
    }

    #[test]
    fn academic_filler_is_filtered() {
        for word in ["cours", "introduction", "notions", "permet"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
    }

    #[test]
    fn stems_of_stopwords_are_stopwords() {
        // The analyzer stems before filtering, so the post-stem forms must be
        // in the set too.
        assert!(is_stopword(&stem("notions")));
        assert!(is_stopword(&stem("travaux")));
        assert!(is_stopword(&stem("cours")));
        assert!(is_stopword(&stem("toutes")));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_stopword("LES"));
        assert!(is_stopword("Cours"));
    }

    #[test]
    fn content_words_survive() {
        for word in ["algèbre", "programmation", "structure", "circuit", "fluide"] {
            assert!(!is_stopword(word), "{word} should not be a stopword");
        }
    }

    #[test]
    fn list_has_the_expected_scale() {
        assert!(BASE_STOPWORDS.len() >= 60);
    }
}
