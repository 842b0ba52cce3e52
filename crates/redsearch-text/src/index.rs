use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tantivy::{Index, IndexWriter};

use redsearch_core::config::AnalyzerConfig;
use redsearch_core::ingest::PostReader;
use redsearch_core::traits::TextIndexer;
use redsearch_core::types::Post;

use crate::corpus::TantivyCorpus;
use crate::tantivy_utils::{build_schema, register_tokenizer, PostFields};

const WRITER_MEMORY: usize = 50_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
	pub files: usize,
	pub documents: usize,
}

pub struct PostIndexer {
	index: Index,
	fields: PostFields,
}

impl PostIndexer {
	/// Create a fresh on-disk index. Anything already at `index_dir` is removed.
	pub fn create(index_dir: PathBuf, analyzer: &AnalyzerConfig) -> Result<Self> {
		if index_dir.exists() { std::fs::remove_dir_all(&index_dir)?; }
		std::fs::create_dir_all(&index_dir)?;
		let index = Index::create_in_dir(&index_dir, build_schema())?;
		Self::with_index(index, analyzer)
	}

	pub fn create_in_ram(analyzer: &AnalyzerConfig) -> Result<Self> {
		Self::with_index(Index::create_in_ram(build_schema()), analyzer)
	}

	fn with_index(index: Index, analyzer: &AnalyzerConfig) -> Result<Self> {
		register_tokenizer(&index, analyzer);
		let fields = PostFields::from_schema(&index.schema())?;
		Ok(Self { index, fields })
	}

	/// Index every CSV file directly under `folder`, committing once at the end.
	pub fn index_folder(&self, folder: &Path) -> Result<IndexStats> {
		let reader = PostReader::new();
		let files = reader.list_csv_files(folder)?;
		let mut index_writer: IndexWriter = self.index.writer(WRITER_MEMORY)?;
		let mut stats = IndexStats::default();
		for file in &files {
			let posts = reader.read_posts(file)?;
			let name = file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
			let pb = ProgressBar::new(posts.len() as u64);
			pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} posts {msg}")?.progress_chars("#>-"));
			pb.set_message(name.clone());
			for post in &posts {
				index_writer.add_document(self.fields.to_document(post))?;
				pb.inc(1);
			}
			pb.finish_with_message(format!("{name} done"));
			tracing::info!(file = %file.display(), posts = posts.len(), "indexed file");
			stats.files += 1;
			stats.documents += posts.len();
		}
		index_writer.commit()?;
		Ok(stats)
	}

	/// A statistics view over everything committed so far.
	pub fn corpus(&self) -> Result<TantivyCorpus> { TantivyCorpus::from_index(self.index.clone()) }
}

impl TextIndexer for PostIndexer {
	fn index(&self, posts: &[Post]) -> anyhow::Result<()> {
		let mut index_writer: IndexWriter = self.index.writer(WRITER_MEMORY)?;
		for post in posts { index_writer.add_document(self.fields.to_document(post))?; }
		index_writer.commit()?;
		Ok(())
	}
}
