use crate::types::{DocRef, Post, SearchHit, Term};

/// Read-only term statistics over a set of documents.
///
/// Implemented by the full index and by ephemeral sub-indexes alike. Unknown
/// terms are never an error: frequencies are simply 0.
pub trait CorpusView: Send + Sync {
    fn total_document_count(&self) -> u64;
    fn document_frequency(&self, term: &str, field: &str) -> anyhow::Result<u64>;
    fn total_term_frequency(&self, term: &str, field: &str) -> anyhow::Result<u64>;
    fn term_frequency_in_document(&self, doc: DocRef, term: &str, field: &str) -> anyhow::Result<u64>;
    /// The vocabulary of `field`, in a stable order.
    fn all_terms(&self, field: &str) -> anyhow::Result<Vec<Term>>;
}

/// An index that relevance feedback can run against.
pub trait FeedbackIndex: CorpusView {
    type SubIndex: CorpusView;

    /// Run `text` through the analyzer of the indexed text field.
    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<Term>>;

    /// Build a transient index holding exactly `docs`, in order.
    fn build_sub_index(&self, docs: &[DocRef]) -> anyhow::Result<Self::SubIndex>;
}

pub trait TextIndexer {
    fn index(&self, posts: &[Post]) -> anyhow::Result<()>;
}

pub trait TextSearch {
    fn search(&self, query: &str, k: usize, default_field: &str) -> anyhow::Result<Vec<SearchHit>>;
    fn fetch_post(&self, doc: DocRef) -> anyhow::Result<Post>;
}
