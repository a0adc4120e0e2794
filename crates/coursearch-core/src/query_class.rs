//! Query shape classification for adaptive scoring.
//!
//! coursearch adapts scoring behavior to the shape of the query:
//!
//! | Query shape  | Example                   | Effect                                  |
//! |--------------|---------------------------|-----------------------------------------|
//! | `Empty`      | `""`                      | Empty result, no scoring                |
//! | `Code`       | `"MAT380"`, `"INF1120"`   | Doubled code weight + prefix boost      |
//! | `SingleWord` | `"algèbre"`               | Title/description substring boosts      |
//! | `MultiWord`  | `"structures de données"` | Plain BM25F over terms and bigrams      |
//!
//! The hybrid dispatcher additionally routes un-selected queries between the
//! fuzzy and BM25F scorers; those heuristics live with the fuser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum alphabetic prefix length of a code-shaped query.
const CODE_MAX_LETTERS: usize = 4;
/// Minimum alphabetic prefix length of a code-shaped query.
const CODE_MIN_LETTERS: usize = 2;
/// Maximum digit-run length of a code-shaped query.
const CODE_MAX_DIGITS: usize = 4;

/// Classification of a search query by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryShape {
    /// Empty or whitespace-only query. Scoring returns empty immediately.
    Empty,
    /// Looks like a course code: 2-4 letters then 0-4 digits (`"MAT380"`).
    Code,
    /// A single word that is not code-shaped (`"algèbre"`).
    SingleWord,
    /// Two or more whitespace-separated words.
    MultiWord,
}

impl QueryShape {
    /// Classify a raw query string.
    #[must_use]
    pub fn classify(query: &str) -> Self {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if is_code_shaped(trimmed) {
            return Self::Code;
        }
        if trimmed.split_whitespace().count() == 1 {
            Self::SingleWord
        } else {
            Self::MultiWord
        }
    }
}

impl fmt::Display for QueryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Code => write!(f, "code"),
            Self::SingleWord => write!(f, "single_word"),
            Self::MultiWord => write!(f, "multi_word"),
        }
    }
}

/// Whether a query looks like a course code: 2-4 ASCII letters followed by
/// 0-4 ASCII digits, nothing else. Case-insensitive.
///
/// Examples: `"LOG"`, `"log100"`, `"INF1120"`, `"GTI"`. Accented letters are
/// not part of any real code and disqualify the query.
#[must_use]
pub fn is_code_shaped(query: &str) -> bool {
    let trimmed = query.trim();
    let letters = trimmed
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .count();
    if !(CODE_MIN_LETTERS..=CODE_MAX_LETTERS).contains(&letters) {
        return false;
    }
    let rest: Vec<char> = trimmed.chars().skip(letters).collect();
    rest.len() <= CODE_MAX_DIGITS && rest.iter().all(char::is_ascii_digit)
}
