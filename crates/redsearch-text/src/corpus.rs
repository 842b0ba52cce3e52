//! Term statistics over a tantivy index, and ephemeral sub-indexes built from
//! a handful of its documents.

use anyhow::Result;
use std::collections::BTreeSet;
use tantivy::postings::Postings;
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::tokenizer::TokenStream;
use tantivy::{DocAddress, DocSet, Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, SegmentReader, TantivyDocument, Term, TERMINATED};

use redsearch_core::traits::{CorpusView, FeedbackIndex};
use redsearch_core::types::{DocRef, Post};

use crate::tantivy_utils::PostFields;

const SUB_INDEX_MEMORY: usize = 50_000_000;

/// A read-only snapshot of a post index.
pub struct TantivyCorpus {
	index: Index,
	searcher: Searcher,
	fields: PostFields,
}

impl TantivyCorpus {
	/// Snapshot the committed state of `index`. Its tokenizers must already be registered.
	pub fn from_index(index: Index) -> Result<Self> {
		let reader: IndexReader = index.reader_builder().reload_policy(ReloadPolicy::Manual).try_into()?;
		let searcher = reader.searcher();
		let fields = PostFields::from_schema(&index.schema())?;
		Ok(Self { index, searcher, fields })
	}

	pub fn index(&self) -> &Index { &self.index }

	pub fn searcher(&self) -> &Searcher { &self.searcher }

	pub fn fields(&self) -> &PostFields { &self.fields }

	pub fn fetch_post(&self, doc: DocRef) -> Result<Post> {
		let stored: TantivyDocument = self.searcher.doc(to_address(doc))?;
		Ok(self.fields.to_post(&stored))
	}

	fn field(&self, name: &str) -> Result<Field> { Ok(self.index.schema().get_field(name)?) }

	fn term_freq_in_segment(segment: &SegmentReader, term: &Term, only: Option<u32>) -> Result<u64> {
		let inverted_index = segment.inverted_index(term.field())?;
		let Some(mut postings) = inverted_index.read_postings(term, IndexRecordOption::WithFreqs)? else { return Ok(0) };
		let alive = segment.alive_bitset();
		if let Some(target) = only {
			let mut current = postings.doc();
			if current < target { current = postings.seek(target); }
			let is_alive = alive.is_none_or(|bits| bits.is_alive(target));
			return Ok(if current == target && is_alive { u64::from(postings.term_freq()) } else { 0 });
		}
		let mut total = 0u64;
		while postings.doc() != TERMINATED {
			if alive.is_none_or(|bits| bits.is_alive(postings.doc())) { total += u64::from(postings.term_freq()); }
			postings.advance();
		}
		Ok(total)
	}
}

pub(crate) fn to_address(doc: DocRef) -> DocAddress { DocAddress::new(doc.segment, doc.doc) }

pub(crate) fn from_address(address: DocAddress) -> DocRef { DocRef::new(address.segment_ord, address.doc_id) }

impl CorpusView for TantivyCorpus {
	fn total_document_count(&self) -> u64 { self.searcher.num_docs() }

	fn document_frequency(&self, term: &str, field: &str) -> Result<u64> {
		let term = Term::from_field_text(self.field(field)?, term);
		Ok(self.searcher.doc_freq(&term)?)
	}

	fn total_term_frequency(&self, term: &str, field: &str) -> Result<u64> {
		let term = Term::from_field_text(self.field(field)?, term);
		let mut total = 0;
		for segment in self.searcher.segment_readers() { total += Self::term_freq_in_segment(segment, &term, None)?; }
		Ok(total)
	}

	fn term_frequency_in_document(&self, doc: DocRef, term: &str, field: &str) -> Result<u64> {
		let term = Term::from_field_text(self.field(field)?, term);
		let Some(segment) = self.searcher.segment_readers().get(doc.segment as usize) else { return Ok(0) };
		Self::term_freq_in_segment(segment, &term, Some(doc.doc))
	}

	fn all_terms(&self, field: &str) -> Result<Vec<String>> {
		let field = self.field(field)?;
		let mut vocabulary = BTreeSet::new();
		for segment in self.searcher.segment_readers() {
			let inverted_index = segment.inverted_index(field)?;
			let mut stream = inverted_index.terms().stream()?;
			while stream.advance() {
				if stream.value().doc_freq == 0 { continue; }
				if let Ok(text) = std::str::from_utf8(stream.key()) { vocabulary.insert(text.to_string()); }
			}
		}
		Ok(vocabulary.into_iter().collect())
	}
}

impl FeedbackIndex for TantivyCorpus {
	type SubIndex = TantivyCorpus;

	fn tokenize(&self, text: &str) -> Result<Vec<String>> {
		let mut analyzer = self.index.tokenizer_for_field(self.fields.text)?;
		let mut stream = analyzer.token_stream(text);
		let mut tokens = Vec::new();
		while stream.advance() { tokens.push(stream.token().text.clone()); }
		Ok(tokens)
	}

	fn build_sub_index(&self, docs: &[DocRef]) -> Result<TantivyCorpus> {
		let mut index = Index::create_in_ram(self.index.schema());
		index.set_tokenizers(self.index.tokenizers().clone());
		let mut writer: IndexWriter = index.writer_with_num_threads(1, SUB_INDEX_MEMORY)?;
		for &doc in docs {
			let stored: TantivyDocument = self.searcher.doc(to_address(doc))?;
			writer.add_document(stored)?;
		}
		writer.commit()?;
		drop(writer);
		tracing::debug!(documents = docs.len(), "built feedback sub-index");
		TantivyCorpus::from_index(index)
	}
}
