use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SearchError;

// ---------------------------------------------------------------------------
// Course records
// ---------------------------------------------------------------------------

/// An immutable course record, the unit of the searchable corpus.
///
/// Carries the raw fields only; tokenized forms and term frequencies are
/// produced by the document preprocessor at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Short alphanumeric identifier (for example `"MAT380"`, `"SYS863-A25"`).
    /// Canonicalized to uppercase with inner whitespace removed.
    pub code: String,
    /// Human title, typically `"CODE - Description"`. May be empty.
    pub title: String,
    /// Multi-sentence free text. May be empty.
    pub description: String,
    /// Credit count. `None` when the source record carries none.
    pub credits: Option<u32>,
    /// Leading alphabetic run of `code` (for example `"MAT"` for `"MAT380"`).
    /// Denormalized at construction for programme filtering.
    pub programme_prefix: String,
}

impl Course {
    /// Creates a course with a canonicalized code and derived programme prefix.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        credits: Option<u32>,
    ) -> Self {
        let code = canonical_code(&code.into());
        let programme_prefix = programme_prefix_of(&code);
        Self {
            code,
            title: title.into(),
            description: description.into(),
            credits,
            programme_prefix,
        }
    }

    /// The course-code prefix of the title, when the title follows the
    /// `"CODE - Description"` convention.
    #[must_use]
    pub fn title_prefix(&self) -> Option<&str> {
        self.title.split_once(" - ").map(|(prefix, _)| prefix.trim())
    }

    /// The title with any `"CODE - "` prefix removed.
    #[must_use]
    pub fn title_postfix(&self) -> &str {
        self.title
            .split_once(" - ")
            .map_or(self.title.as_str(), |(_, postfix)| postfix.trim())
    }
}

/// Canonicalizes a course code: trimmed, uppercased, inner whitespace removed.
#[must_use]
pub fn canonical_code(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Extracts the leading alphabetic run of a canonical code.
#[must_use]
pub fn programme_prefix_of(code: &str) -> String {
    code.chars().take_while(|c| c.is_alphabetic()).collect()
}

// ---------------------------------------------------------------------------
// Programmes
// ---------------------------------------------------------------------------

/// Known programme codes, matched against the alphabetic prefix of a course
/// code during filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Programme {
    ATE,
    CHM,
    CTN,
    ELE,
    ENV,
    GES,
    GOL,
    GPA,
    GTI,
    INF,
    ING,
    LOG,
    MAT,
    MEC,
    PHY,
    PRE,
    SYS,
    TI,
    TIN,
}

impl Programme {
    /// All known programmes, in code order.
    pub const ALL: &'static [Self] = &[
        Self::ATE,
        Self::CHM,
        Self::CTN,
        Self::ELE,
        Self::ENV,
        Self::GES,
        Self::GOL,
        Self::GPA,
        Self::GTI,
        Self::INF,
        Self::ING,
        Self::LOG,
        Self::MAT,
        Self::MEC,
        Self::PHY,
        Self::PRE,
        Self::SYS,
        Self::TI,
        Self::TIN,
    ];

    /// The programme code as an uppercase string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ATE => "ATE",
            Self::CHM => "CHM",
            Self::CTN => "CTN",
            Self::ELE => "ELE",
            Self::ENV => "ENV",
            Self::GES => "GES",
            Self::GOL => "GOL",
            Self::GPA => "GPA",
            Self::GTI => "GTI",
            Self::INF => "INF",
            Self::ING => "ING",
            Self::LOG => "LOG",
            Self::MAT => "MAT",
            Self::MEC => "MEC",
            Self::PHY => "PHY",
            Self::PRE => "PRE",
            Self::SYS => "SYS",
            Self::TI => "TI",
            Self::TIN => "TIN",
        }
    }
}

impl fmt::Display for Programme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Programme {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == upper)
            .ok_or(SearchError::UnknownProgramme {
                value: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Search options
// ---------------------------------------------------------------------------

/// Optional pre-scoring filters. Any absent component means "no constraint";
/// a fully absent value is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Programmes to keep, matched by course-code prefix.
    pub programmes: Option<Vec<Programme>>,
    /// Minimum credits, inclusive.
    pub min_credits: Option<u32>,
    /// Maximum credits, inclusive.
    pub max_credits: Option<u32>,
}

impl SearchOptions {
    /// Restricts results to the given programmes.
    #[must_use]
    pub fn with_programmes(mut self, programmes: impl Into<Vec<Programme>>) -> Self {
        self.programmes = Some(programmes.into());
        self
    }

    /// Sets the inclusive minimum credit bound.
    #[must_use]
    pub fn with_min_credits(mut self, min: u32) -> Self {
        self.min_credits = Some(min);
        self
    }

    /// Sets the inclusive maximum credit bound.
    #[must_use]
    pub fn with_max_credits(mut self, max: u32) -> Self {
        self.max_credits = Some(max);
        self
    }

    /// Whether this value constrains nothing (equivalent to omitting options).
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.programmes.as_ref().is_none_or(Vec::is_empty)
            && self.min_credits.is_none()
            && self.max_credits.is_none()
    }
}

// ---------------------------------------------------------------------------
// Ranked results
// ---------------------------------------------------------------------------

/// A ranked search result delivered to consumers.
///
/// `score` is finite and non-negative; within one response scores are
/// monotone non-increasing across positions. Scores from distinct responses
/// are not comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Course code.
    pub code: String,
    /// Course title.
    pub title: String,
    /// Course description.
    pub description: String,
    /// Credit count, when known.
    pub credits: Option<u32>,
    /// Relevance score. `f64` because the hybrid rank micro-adjustment
    /// (1e-12 per position) is below `f32` resolution.
    pub score: f64,
}

impl SearchHit {
    /// Builds a hit from a course and its computed score.
    #[must_use]
    pub fn from_course(course: &Course, score: f64) -> Self {
        Self {
            code: course.code.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            credits: course.credits,
            score,
        }
    }

    /// Deterministic ranking order: score descending, then code ascending.
    /// NaN sorts below all real values.
    #[must_use]
    pub fn cmp_by_rank(&self, other: &Self) -> Ordering {
        sanitize(other.score)
            .total_cmp(&sanitize(self.score))
            .then_with(|| self.code.cmp(&other.code))
    }
}

/// A ranked autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteHit {
    /// Course code.
    pub code: String,
    /// Course title.
    pub title: String,
    /// Relevance score.
    pub score: f64,
}

impl AutocompleteHit {
    /// Builds a suggestion from a course and its computed score.
    #[must_use]
    pub fn from_course(course: &Course, score: f64) -> Self {
        Self {
            code: course.code.clone(),
            title: course.title.clone(),
            score,
        }
    }

    /// Deterministic ranking order: score descending, then code ascending.
    #[must_use]
    pub fn cmp_by_rank(&self, other: &Self) -> Ordering {
        sanitize(other.score)
            .total_cmp(&sanitize(self.score))
            .then_with(|| self.code.cmp(&other.code))
    }
}

// Map NaN to NEG_INFINITY so it sorts last in descending order.
fn sanitize(score: f64) -> f64 {
    if score.is_nan() { f64::NEG_INFINITY } else { score }
}

// ---------------------------------------------------------------------------
// Algorithm selector
// ---------------------------------------------------------------------------

/// Which scorer a caller asked for. The transport layer defaults to hybrid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Field-weighted BM25 only.
    Bm25,
    /// Edit-distance fuzzy matching only.
    Fuzzy,
    /// Both scorers, fused.
    #[default]
    Hybrid,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bm25 => write!(f, "bm25"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bm25" => Ok(Self::Bm25),
            "fuzzy" => Ok(Self::Fuzzy),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(SearchError::UnknownAlgorithm {
                value: other.to_owned(),
            }),
        }
    }
}
