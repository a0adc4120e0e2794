//! Pre-scoring candidate filtering by programme and credit range.
//!
//! Filtering runs before any scorer touches the corpus, so filtered-out
//! courses can never appear in a response regardless of score. Inconsistent
//! options (`min_credits > max_credits`, a programme matching no course) are
//! not errors; the filter simply matches nothing.

use crate::types::{Course, SearchOptions};

/// Returns the candidate set for a query: every course passing `options`.
///
/// `None` or an unconstrained value keeps the whole corpus.
#[must_use]
pub fn candidates<'a>(courses: &'a [Course], options: Option<&SearchOptions>) -> Vec<&'a Course> {
    match options {
        Some(options) if !options.is_unconstrained() => courses
            .iter()
            .filter(|course| matches(course, options))
            .collect(),
        _ => courses.iter().collect(),
    }
}

/// Whether a single course passes the given options.
#[must_use]
pub fn matches(course: &Course, options: &SearchOptions) -> bool {
    matches_programmes(course, options) && matches_credits(course, options)
}

/// Programme filter: the uppercased code must start with at least one of the
/// named programme prefixes. An absent or empty list keeps everything.
fn matches_programmes(course: &Course, options: &SearchOptions) -> bool {
    match options.programmes.as_deref() {
        None | Some([]) => true,
        Some(programmes) => {
            let code = course.code.to_uppercase();
            programmes.iter().any(|p| code.starts_with(p.as_str()))
        }
    }
}

/// Credits filter: `min <= credits <= max`, bounds optional and inclusive.
/// Courses without credits fail whenever either bound is set.
fn matches_credits(course: &Course, options: &SearchOptions) -> bool {
    if options.min_credits.is_none() && options.max_credits.is_none() {
        return true;
    }
    let Some(credits) = course.credits else {
        return false;
    };
    options.min_credits.is_none_or(|min| credits >= min)
        && options.max_credits.is_none_or(|max| credits <= max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Programme;

    fn corpus() -> Vec<Course> {
        vec![
            Course::new("LOG100", "LOG100 - Introduction à la programmation", "", Some(3)),
            Course::new("LOG200", "LOG200 - Programmation avancée", "", Some(4)),
            Course::new("MAT380", "MAT380 - Algèbre linéaire", "", Some(3)),
            Course::new("GPA123", "GPA123 - Automatisation industrielle", "", None),
        ]
    }

    fn codes(courses: &[&Course]) -> Vec<String> {
        courses.iter().map(|c| c.code.clone()).collect()
    }

    #[test]
    fn no_options_keeps_everything() {
        let corpus = corpus();
        assert_eq!(candidates(&corpus, None).len(), corpus.len());
    }

    #[test]
    fn unconstrained_options_are_a_no_op() {
        let corpus = corpus();
        let options = SearchOptions::default();
        assert_eq!(candidates(&corpus, Some(&options)).len(), corpus.len());
    }

    #[test]
    fn programme_filter_keeps_matching_prefixes() {
        let corpus = corpus();
        let options = SearchOptions::default().with_programmes(vec![Programme::LOG]);
        let kept = candidates(&corpus, Some(&options));
        assert_eq!(codes(&kept), vec!["LOG100", "LOG200"]);
    }

    #[test]
    fn multiple_programmes_are_a_union() {
        let corpus = corpus();
        let options =
            SearchOptions::default().with_programmes(vec![Programme::LOG, Programme::MAT]);
        let kept = candidates(&corpus, Some(&options));
        assert_eq!(codes(&kept), vec!["LOG100", "LOG200", "MAT380"]);
    }

    #[test]
    fn credit_bounds_are_inclusive() {
        let corpus = corpus();
        let options = SearchOptions::default().with_min_credits(3).with_max_credits(4);
        let kept = candidates(&corpus, Some(&options));
        // GPA123 has no credits and fails once a bound is set.
        assert_eq!(codes(&kept), vec!["LOG100", "LOG200", "MAT380"]);
    }

    #[test]
    fn missing_credits_fail_when_a_bound_is_set() {
        let corpus = corpus();
        let options = SearchOptions::default().with_min_credits(0);
        let kept = candidates(&corpus, Some(&options));
        assert!(!codes(&kept).contains(&"GPA123".to_owned()));
    }

    #[test]
    fn inconsistent_bounds_match_nothing() {
        let corpus = corpus();
        let options = SearchOptions::default().with_min_credits(5).with_max_credits(2);
        assert!(candidates(&corpus, Some(&options)).is_empty());
    }

    #[test]
    fn unmatched_programme_matches_nothing() {
        let corpus = corpus();
        let options = SearchOptions::default().with_programmes(vec![Programme::CHM]);
        assert!(candidates(&corpus, Some(&options)).is_empty());
    }

    #[test]
    fn programme_and_credits_compose() {
        let corpus = corpus();
        let options = SearchOptions::default()
            .with_programmes(vec![Programme::LOG])
            .with_min_credits(4);
        let kept = candidates(&corpus, Some(&options));
        assert_eq!(codes(&kept), vec!["LOG200"]);
    }
}
