use anyhow::Result;
use serde::Serialize;
use std::fmt;

use redsearch_core::config::{ExpansionConfig, FeedbackStatistics};
use redsearch_core::traits::{CorpusView, FeedbackIndex};
use redsearch_core::types::{DocRef, Term};

use crate::builder::build_score_vector;
use crate::rocchio::merge_rocchio;
use crate::selector::select_terms;
use crate::vector::ScoreVector;

/// The outcome of one relevance-feedback round.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Expansion {
    original_tokens: Vec<Term>,
    terms: Vec<(Term, f64)>,
}

impl Expansion {
    /// Analyzed tokens of the raw query, duplicates included.
    pub fn original_tokens(&self) -> &[Term] { &self.original_tokens }

    /// Selected terms with their merged weights, best first.
    pub fn terms(&self) -> &[(Term, f64)] { &self.terms }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Terms joined by single spaces.
    pub fn query_string(&self) -> String {
        self.terms.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>().join(" ")
    }

    /// Like [`Expansion::query_string`] but each term carries its weight as a boost.
    pub fn boosted_query_string(&self) -> String {
        self.terms.iter().map(|(t, w)| format!("{t}^{w:.4}")).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.query_string()) }
}

/// Expand `raw_query` with Rocchio relevance feedback.
///
/// Feedback vectors for the relevant and non-relevant sets are built in
/// parallel. An empty feedback set contributes nothing; a query that analyzes
/// to no tokens gives an empty expansion. Errors from `index` are returned
/// unchanged.
pub fn expand_query<I: FeedbackIndex + ?Sized>(
    index: &I,
    raw_query: &str,
    relevant: &[DocRef],
    nonrelevant: &[DocRef],
    config: &ExpansionConfig,
) -> Result<Expansion> {
    config.validate()?;
    let tokens = index.tokenize(raw_query)?;
    if tokens.is_empty() {
        tracing::debug!(raw_query, "query has no tokens, nothing to expand");
        return Ok(Expansion::default());
    }

    let q0 = build_score_vector(index, config.alpha, None, Some(&tokens[..]), &config.field)?;
    let (relevant_vec, nonrelevant_vec) = rayon::join(
        || feedback_vector(index, relevant, config.beta, config),
        || feedback_vector(index, nonrelevant, config.gamma, config),
    );
    let (relevant_vec, nonrelevant_vec) = (relevant_vec?, nonrelevant_vec?);

    let merged = merge_rocchio(&q0, &relevant_vec, &nonrelevant_vec);
    let terms = select_terms(&merged, tokens.len(), config.max_added_terms, config.threshold);
    tracing::debug!(
        tokens = tokens.len(),
        relevant_terms = relevant_vec.len(),
        nonrelevant_terms = nonrelevant_vec.len(),
        merged_terms = merged.len(),
        selected = terms.len(),
        "expanded query"
    );
    Ok(Expansion { original_tokens: tokens, terms })
}

fn feedback_vector<I: FeedbackIndex + ?Sized>(index: &I, docs: &[DocRef], weight: f64, config: &ExpansionConfig) -> Result<ScoreVector> {
    if docs.is_empty() { return Ok(ScoreVector::new()); }
    let sub_index = index.build_sub_index(docs)?;
    match config.statistics {
        FeedbackStatistics::SubIndex => build_score_vector(&sub_index, weight, None, None, &config.field),
        FeedbackStatistics::Corpus => {
            let vocabulary = sub_index.all_terms(&config.field)?;
            build_score_vector(index, weight, Some(docs), Some(&vocabulary[..]), &config.field)
        }
    }
}
