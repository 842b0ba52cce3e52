use indexmap::IndexMap;
use serde::Serialize;

use redsearch_core::types::Term;

/// Sparse term weights. A missing term weighs 0.
///
/// Entries keep the order they were first inserted in. Equality ignores that
/// order; only the term selector uses it, to break ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreVector {
    scores: IndexMap<Term, f64>,
}

impl ScoreVector {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, term: &str) -> f64 { self.scores.get(term).copied().unwrap_or(0.0) }

    pub fn contains(&self, term: &str) -> bool { self.scores.contains_key(term) }

    pub fn insert(&mut self, term: Term, score: f64) { self.scores.insert(term, score); }

    /// Add `delta` to the weight of `term`, creating the entry if needed.
    pub fn add(&mut self, term: &str, delta: f64) {
        match self.scores.get_mut(term) {
            Some(score) => *score += delta,
            None => { self.scores.insert(term.to_string(), delta); }
        }
    }

    pub fn len(&self) -> usize { self.scores.len() }

    pub fn is_empty(&self) -> bool { self.scores.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ { self.scores.iter().map(|(t, s)| (t.as_str(), *s)) }
}

impl FromIterator<(Term, f64)> for ScoreVector {
    fn from_iter<I: IntoIterator<Item = (Term, f64)>>(iter: I) -> Self { Self { scores: iter.into_iter().collect() } }
}
