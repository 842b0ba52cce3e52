use redsearch_core::types::Term;

use crate::vector::ScoreVector;

/// Terms scoring strictly above `threshold`, best first, capped at
/// `original_token_count + max_added_terms`. Equal scores keep the order of
/// `merged`.
pub fn select_terms(merged: &ScoreVector, original_token_count: usize, max_added_terms: usize, threshold: f64) -> Vec<(Term, f64)> {
    let mut kept: Vec<(Term, f64)> = merged.iter().filter(|(_, score)| *score > threshold).map(|(term, score)| (term.to_string(), score)).collect();
    kept.sort_by(|a, b| b.1.total_cmp(&a.1));
    kept.truncate(original_token_count.saturating_add(max_added_terms));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> ScoreVector { entries.iter().map(|(t, s)| (t.to_string(), *s)).collect() }

    fn names(selected: &[(Term, f64)]) -> Vec<&str> { selected.iter().map(|(t, _)| t.as_str()).collect() }

    #[test]
    fn filters_sorts_and_caps() {
        let merged = vector(&[("a", 0.5), ("b", 2.0), ("c", -1.0), ("d", 0.0), ("e", 1.0), ("f", 3.0)]);
        let selected = select_terms(&merged, 1, 2, 0.0);
        assert_eq!(names(&selected), vec!["f", "b", "e"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let merged = vector(&[("sat", 0.75), ("cat", 2.0), ("the", 0.75), ("ran", 0.75)]);
        assert_eq!(names(&select_terms(&merged, 1, 5, 0.0)), vec!["cat", "sat", "the", "ran"]);
    }

    #[test]
    fn never_exceeds_cap_or_admits_threshold() {
        let merged: ScoreVector = (0..50).map(|i| (format!("t{i}"), f64::from(i % 7) - 2.0)).collect();
        for threshold in [-5.0, 0.0, 1.5, 10.0] {
            for (orig, extra) in [(0, 0), (1, 0), (2, 5), (3, 100)] {
                let selected = select_terms(&merged, orig, extra, threshold);
                assert!(selected.len() <= orig + extra);
                assert!(selected.iter().all(|(_, s)| *s > threshold));
                assert!(selected.windows(2).all(|w| w[0].1 >= w[1].1));
            }
        }
    }

    #[test]
    fn zero_added_terms_keeps_original_count() {
        let merged = vector(&[("x", 1.0), ("y", 5.0), ("z", 3.0)]);
        assert_eq!(names(&select_terms(&merged, 2, 0, 0.0)), vec!["y", "z"]);
    }

    #[test]
    fn nan_scores_are_dropped() {
        let merged = vector(&[("x", f64::NAN), ("y", 1.0)]);
        assert_eq!(names(&select_terms(&merged, 1, 5, 0.0)), vec!["y"]);
    }
}
