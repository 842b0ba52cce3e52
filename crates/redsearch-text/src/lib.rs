//! redsearch-text
//!
//! Tantivy-backed post index: schema and analyzer, CSV ingestion, keyword
//! search, and the term statistics consumed by relevance feedback.

pub mod tantivy_utils;
pub mod corpus;
pub mod index;
pub mod search;

pub use corpus::TantivyCorpus;
pub use index::{IndexStats, PostIndexer};
pub use search::PostSearcher;
