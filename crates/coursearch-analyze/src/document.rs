//! Per-document field indexing and corpus-wide statistics.
//!
//! BM25F scores each field independently, so every course gets three term
//! frequency tables (code, title, description) and three field lengths.
//! Lengths are clamped to at least 1 (an empty field must not divide by
//! zero), and bigram terms count toward length like any other token. A
//! course with absent or unparseable fields degrades to empty tables and
//! placeholder lengths rather than poisoning the whole index.

use std::collections::HashMap;

use coursearch_core::Course;

use crate::analyze_field;

/// Term frequencies and token count for a single field.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    frequencies: HashMap<String, u32>,
    len: usize,
}

impl FieldIndex {
    /// Indexes one field's text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_tokens(analyze_field(text))
    }

    /// Builds the index from pre-analyzed tokens.
    #[must_use]
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let len = tokens.len().max(1);
        let mut frequencies = HashMap::with_capacity(tokens.len());
        for token in tokens {
            *frequencies.entry(token).or_insert(0) += 1;
        }
        Self { frequencies, len }
    }

    /// The empty-field placeholder: no terms, length 1.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            frequencies: HashMap::new(),
            len: 1,
        }
    }

    /// Occurrences of `term` in this field.
    #[must_use]
    pub fn frequency(&self, term: &str) -> u32 {
        self.frequencies.get(term).copied().unwrap_or(0)
    }

    /// Whether `term` occurs in this field.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.frequencies.contains_key(term)
    }

    /// Token count of the field, clamped to at least 1.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the field indexed no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// A course with its three field indexes.
#[derive(Debug, Clone)]
pub struct DocumentIndex<'a> {
    /// The underlying course record.
    pub course: &'a Course,
    /// Index over the course code.
    pub code: FieldIndex,
    /// Index over the title.
    pub title: FieldIndex,
    /// Index over the description.
    pub description: FieldIndex,
}

impl<'a> DocumentIndex<'a> {
    /// Indexes all three fields of a course.
    #[must_use]
    pub fn build(course: &'a Course) -> Self {
        Self {
            course,
            code: index_optional(&course.code),
            title: index_optional(&course.title),
            description: index_optional(&course.description),
        }
    }

    /// Whether `term` occurs in any field.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.code.contains(term) || self.title.contains(term) || self.description.contains(term)
    }
}

fn index_optional(text: &str) -> FieldIndex {
    if text.trim().is_empty() {
        FieldIndex::empty()
    } else {
        FieldIndex::from_text(text)
    }
}

/// Corpus-wide average field lengths, each clamped to at least 1.0.
#[derive(Debug, Clone, Copy)]
pub struct CorpusStats {
    /// Average code-field token count.
    pub avg_code_len: f64,
    /// Average title-field token count.
    pub avg_title_len: f64,
    /// Average description-field token count.
    pub avg_desc_len: f64,
}

impl CorpusStats {
    /// Computes averages over the indexed documents.
    #[must_use]
    pub fn compute(documents: &[DocumentIndex<'_>]) -> Self {
        if documents.is_empty() {
            return Self {
                avg_code_len: 1.0,
                avg_title_len: 1.0,
                avg_desc_len: 1.0,
            };
        }
        #[allow(clippy::cast_precision_loss)]
        let count = documents.len() as f64;
        let average = |field_len: fn(&DocumentIndex<'_>) -> usize| {
            #[allow(clippy::cast_precision_loss)]
            let total: f64 = documents.iter().map(|doc| field_len(doc) as f64).sum();
            (total / count).max(1.0)
        };
        Self {
            avg_code_len: average(|doc| doc.code.len()),
            avg_title_len: average(|doc| doc.title.len()),
            avg_desc_len: average(|doc| doc.description.len()),
        }
    }
}

/// Indexes a pre-filtered candidate set.
#[must_use]
pub fn index_candidates<'a>(candidates: &[&'a Course]) -> Vec<DocumentIndex<'a>> {
    candidates
        .iter()
        .map(|course| DocumentIndex::build(course))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, title: &str, description: &str) -> Course {
        Course::new(code, title, description, Some(3))
    }

    #[test]
    fn field_index_counts_repeats() {
        let index = FieldIndex::from_tokens(vec![
            "donnée".to_owned(),
            "structure".to_owned(),
            "donnée".to_owned(),
        ]);
        assert_eq!(index.frequency("donnée"), 2);
        assert_eq!(index.frequency("structure"), 1);
        assert_eq!(index.frequency("absent"), 0);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn empty_field_has_placeholder_length() {
        let index = FieldIndex::empty();
        assert!(index.is_empty());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn bigrams_count_toward_field_length() {
        let index = FieldIndex::from_text("structures de données");
        // "structure", "donnée", and the bigram joining them.
        assert_eq!(index.len(), 3);
        assert!(index.contains("structure_donnée"));
    }

    #[test]
    fn document_index_covers_all_fields() {
        let course = course(
            "MAT380",
            "MAT380 - Algèbre linéaire",
            "Introduction à l'algèbre linéaire et ses applications",
        );
        let doc = DocumentIndex::build(&course);
        assert!(doc.code.contains("mat"));
        assert!(doc.code.contains("380"));
        assert!(doc.title.contains("algèbre"));
        assert!(doc.description.contains("application"));
        assert!(doc.contains("linéaire"));
        assert!(!doc.contains("circuit"));
    }

    #[test]
    fn blank_fields_become_placeholders() {
        let course = course("TEST001", "Cours test", "   ");
        let doc = DocumentIndex::build(&course);
        assert!(doc.description.is_empty());
        assert_eq!(doc.description.len(), 1);
    }

    #[test]
    fn stats_average_over_documents() {
        let a = course("LOG100", "calcul matriciel avancé vectoriel", "");
        let b = course("LOG200", "calcul vectoriel", "");
        let docs = vec![DocumentIndex::build(&a), DocumentIndex::build(&b)];
        let stats = CorpusStats::compute(&docs);
        // Field lengths include bigrams: (4+3) and (2+1) → average 5.0.
        assert!((stats.avg_title_len - 5.0).abs() < 1e-9);
        assert!(stats.avg_desc_len >= 1.0);
    }

    #[test]
    fn stats_on_empty_corpus_are_clamped() {
        let stats = CorpusStats::compute(&[]);
        assert!((stats.avg_code_len - 1.0).abs() < 1e-9);
        assert!((stats.avg_title_len - 1.0).abs() < 1e-9);
        assert!((stats.avg_desc_len - 1.0).abs() < 1e-9);
    }
}
