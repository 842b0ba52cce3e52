use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value, STORED, STRING};
use tantivy::tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, StopWordFilter, TextAnalyzer};
use tantivy::{doc, Index, TantivyDocument};

use redsearch_core::config::AnalyzerConfig;
use redsearch_core::types::{fields, Post};

pub const TEXT_TOKENIZER: &str = "reddit_text";

pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	let text_field_indexing = TextFieldIndexing::default().set_tokenizer(TEXT_TOKENIZER).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	let text_options = TextOptions::default().set_indexing_options(text_field_indexing).set_stored();
	schema_builder.add_text_field(fields::TEXT, text_options);
	for name in [fields::ID, fields::SUBREDDIT, fields::META, fields::TIME, fields::AUTHOR] {
		schema_builder.add_text_field(name, STRING | STORED);
	}
	for name in [fields::UPS, fields::DOWNS, fields::AUTHOR_LINK_KARMA, fields::AUTHOR_KARMA] {
		schema_builder.add_i64_field(name, STORED);
	}
	schema_builder.add_bool_field(fields::AUTHOR_IS_GOLD, STORED);
	schema_builder.build()
}

pub fn register_tokenizer(index: &Index, config: &AnalyzerConfig) {
	let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(RemoveLongFilter::limit(config.max_token_len))
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(config.stop_words.iter().map(|s| s.to_lowercase())))
		.build();
	index.tokenizers().register(TEXT_TOKENIZER, tokenizer);
}

/// Resolved schema fields of a post index.
#[derive(Debug, Clone, Copy)]
pub struct PostFields {
	pub text: Field,
	pub id: Field,
	pub subreddit: Field,
	pub meta: Field,
	pub time: Field,
	pub author: Field,
	pub ups: Field,
	pub downs: Field,
	pub author_link_karma: Field,
	pub author_karma: Field,
	pub author_is_gold: Field,
}

impl PostFields {
	pub fn from_schema(schema: &Schema) -> tantivy::Result<Self> {
		Ok(Self {
			text: schema.get_field(fields::TEXT)?,
			id: schema.get_field(fields::ID)?,
			subreddit: schema.get_field(fields::SUBREDDIT)?,
			meta: schema.get_field(fields::META)?,
			time: schema.get_field(fields::TIME)?,
			author: schema.get_field(fields::AUTHOR)?,
			ups: schema.get_field(fields::UPS)?,
			downs: schema.get_field(fields::DOWNS)?,
			author_link_karma: schema.get_field(fields::AUTHOR_LINK_KARMA)?,
			author_karma: schema.get_field(fields::AUTHOR_KARMA)?,
			author_is_gold: schema.get_field(fields::AUTHOR_IS_GOLD)?,
		})
	}

	pub fn to_document(&self, post: &Post) -> TantivyDocument {
		doc!(
			self.text => post.text.clone(),
			self.id => post.id.clone(),
			self.subreddit => post.subreddit.clone(),
			self.meta => post.meta.clone(),
			self.time => post.time.clone(),
			self.author => post.author.clone(),
			self.ups => post.ups,
			self.downs => post.downs,
			self.author_link_karma => post.author_link_karma,
			self.author_karma => post.author_karma,
			self.author_is_gold => post.author_is_gold,
		)
	}

	pub fn to_post(&self, doc: &TantivyDocument) -> Post {
		let text = |f: Field| doc.get_first(f).and_then(|v| v.as_str()).unwrap_or("").to_string();
		let number = |f: Field| doc.get_first(f).and_then(|v| v.as_i64()).unwrap_or(0);
		Post {
			text: text(self.text),
			id: text(self.id),
			subreddit: text(self.subreddit),
			meta: text(self.meta),
			time: text(self.time),
			author: text(self.author),
			ups: number(self.ups),
			downs: number(self.downs),
			author_link_karma: number(self.author_link_karma),
			author_karma: number(self.author_karma),
			author_is_gold: doc.get_first(self.author_is_gold).and_then(|v| v.as_bool()).unwrap_or(false),
		}
	}
}
