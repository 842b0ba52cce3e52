//! In-memory corpus for unit tests. Documents are whitespace-split and
//! lowercased; every document lives in segment 0 and only has a "text" field.

use anyhow::{bail, Result};
use std::collections::BTreeSet;

use redsearch_core::traits::{CorpusView, FeedbackIndex};
use redsearch_core::types::{DocRef, Term};

pub struct MemoryCorpus {
    docs: Vec<Vec<Term>>,
}

impl MemoryCorpus {
    pub fn new(texts: &[&str]) -> Self { Self { docs: texts.iter().map(|t| analyze(t)).collect() } }

    pub fn doc(i: u32) -> DocRef { DocRef::new(0, i) }

    fn check(field: &str) -> Result<()> {
        if field != "text" { bail!("no such field: {field}"); }
        Ok(())
    }
}

fn analyze(text: &str) -> Vec<Term> { text.split_whitespace().map(str::to_lowercase).collect() }

fn count(doc: &[Term], term: &str) -> u64 { doc.iter().filter(|t| *t == term).count() as u64 }

impl CorpusView for MemoryCorpus {
    fn total_document_count(&self) -> u64 { self.docs.len() as u64 }

    fn document_frequency(&self, term: &str, field: &str) -> Result<u64> {
        Self::check(field)?;
        Ok(self.docs.iter().filter(|d| count(d, term) > 0).count() as u64)
    }

    fn total_term_frequency(&self, term: &str, field: &str) -> Result<u64> {
        Self::check(field)?;
        Ok(self.docs.iter().map(|d| count(d, term)).sum())
    }

    fn term_frequency_in_document(&self, doc: DocRef, term: &str, field: &str) -> Result<u64> {
        Self::check(field)?;
        Ok(self.docs.get(doc.doc as usize).map_or(0, |d| count(d, term)))
    }

    fn all_terms(&self, field: &str) -> Result<Vec<Term>> {
        Self::check(field)?;
        let vocabulary: BTreeSet<&Term> = self.docs.iter().flatten().collect();
        Ok(vocabulary.into_iter().cloned().collect())
    }
}

impl FeedbackIndex for MemoryCorpus {
    type SubIndex = MemoryCorpus;

    fn tokenize(&self, text: &str) -> Result<Vec<Term>> { Ok(analyze(text)) }

    fn build_sub_index(&self, docs: &[DocRef]) -> Result<MemoryCorpus> {
        let mut selected = Vec::with_capacity(docs.len());
        for doc in docs {
            match self.docs.get(doc.doc as usize) {
                Some(d) => selected.push(d.clone()),
                None => bail!("no document {doc}"),
            }
        }
        Ok(MemoryCorpus { docs: selected })
    }
}
