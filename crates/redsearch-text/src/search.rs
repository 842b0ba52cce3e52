use anyhow::Result;
use std::path::Path;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::{Index, TantivyDocument};

use redsearch_core::config::AnalyzerConfig;
use redsearch_core::error::Error;
use redsearch_core::traits::TextSearch;
use redsearch_core::types::{fields, DocRef, Post, SearchHit};

use crate::corpus::{from_address, TantivyCorpus};
use crate::tantivy_utils::register_tokenizer;

pub struct PostSearcher {
	corpus: TantivyCorpus,
}

impl PostSearcher {
	pub fn open(index_dir: &Path, analyzer: &AnalyzerConfig) -> Result<Self> {
		if !index_dir.exists() {
			return Err(Error::NotFound(format!("no index at {}", index_dir.display())).into());
		}
		let index = Index::open_in_dir(index_dir)?;
		register_tokenizer(&index, analyzer);
		Ok(Self { corpus: TantivyCorpus::from_index(index)? })
	}

	pub fn from_corpus(corpus: TantivyCorpus) -> Self { Self { corpus } }

	/// The statistics view relevance feedback runs against.
	pub fn corpus(&self) -> &TantivyCorpus { &self.corpus }
}

impl TextSearch for PostSearcher {
	fn search(&self, query: &str, k: usize, default_field: &str) -> anyhow::Result<Vec<SearchHit>> {
		if !fields::SEARCHABLE.contains(&default_field) {
			return Err(Error::UnknownField(default_field.to_string()).into());
		}
		if k == 0 { return Ok(Vec::new()); }
		let index = self.corpus.index();
		let searcher = self.corpus.searcher();
		let qp = QueryParser::for_index(index, vec![index.schema().get_field(default_field)?]);
		let q = qp.parse_query(query)?;
		let top_docs = searcher.search(&q, &TopDocs::with_limit(k))?;
		let mut hits = Vec::with_capacity(top_docs.len());
		for (score, addr) in top_docs {
			let doc: TantivyDocument = searcher.doc(addr)?;
			hits.push(SearchHit { doc: from_address(addr), score, post: self.corpus.fields().to_post(&doc) });
		}
		tracing::debug!(query, hits = hits.len(), "search");
		Ok(hits)
	}

	fn fetch_post(&self, doc: DocRef) -> anyhow::Result<Post> { self.corpus.fetch_post(doc) }
}
