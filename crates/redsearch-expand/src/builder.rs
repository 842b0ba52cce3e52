//! Weighted TF-IDF score vectors.
//!
//! `score(t) = weight * sqrt(tf) * (ln((N + 1) / (df + 1)) + 1)` where `tf` is
//! the raw frequency of `t` (over the whole view, or summed over a document
//! set), `df` its document frequency and `N` the number of documents in the
//! view. The `+1` smoothing keeps every score finite, including on empty views.

use anyhow::Result;

use redsearch_core::traits::CorpusView;
use redsearch_core::types::{DocRef, Term};

use crate::vector::ScoreVector;

/// Smoothed inverse document frequency.
pub fn smoothed_idf(total_docs: u64, doc_freq: u64) -> f64 {
    ((total_docs as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0
}

/// Score `terms` (or, if `None`, the whole vocabulary of `field`) against `view`.
///
/// With `documents`, raw frequencies are summed over exactly those documents
/// while `df` and `N` still come from `view`. Terms the view has never seen
/// score 0. Repeated terms are scored once.
pub fn build_score_vector<V: CorpusView + ?Sized>(
    view: &V,
    weight: f64,
    documents: Option<&[DocRef]>,
    terms: Option<&[Term]>,
    field: &str,
) -> Result<ScoreVector> {
    let vocabulary;
    let terms = match terms {
        Some(terms) => terms,
        None => {
            vocabulary = view.all_terms(field)?;
            vocabulary.as_slice()
        }
    };
    let total_docs = view.total_document_count();
    let mut vector = ScoreVector::new();
    for term in terms {
        if vector.contains(term) { continue; }
        let raw = match documents {
            None => view.total_term_frequency(term, field)?,
            Some(docs) => {
                let mut sum = 0;
                for &doc in docs { sum += view.term_frequency_in_document(doc, term, field)?; }
                sum
            }
        };
        let tf = (raw as f64).sqrt();
        let idf = smoothed_idf(total_docs, view.document_frequency(term, field)?);
        vector.insert(term.clone(), weight * tf * idf);
    }
    Ok(vector)
}
