//! redsearch-expand
//!
//! Rocchio relevance feedback. Given a query, documents marked relevant and
//! documents marked non-relevant, builds weighted TF-IDF vectors from any
//! [`FeedbackIndex`](redsearch_core::traits::FeedbackIndex), merges them and
//! selects the terms of an expanded query.

pub mod builder;
pub mod expander;
pub mod rocchio;
pub mod selector;
pub mod vector;

#[cfg(test)]
mod test_support;

pub use builder::{build_score_vector, smoothed_idf};
pub use expander::{expand_query, Expansion};
pub use rocchio::merge_rocchio;
pub use selector::select_terms;
pub use vector::ScoreVector;
