//! Domain types shared by the text index and the expansion engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A normalized token as produced by the index analyzer.
pub type Term = String;

/// Field names of an indexed post.
pub mod fields {
    pub const TEXT: &str = "text";
    pub const ID: &str = "id";
    pub const SUBREDDIT: &str = "subreddit";
    pub const META: &str = "meta";
    pub const TIME: &str = "time";
    pub const AUTHOR: &str = "author";
    pub const UPS: &str = "ups";
    pub const DOWNS: &str = "downs";
    pub const AUTHOR_LINK_KARMA: &str = "authorlinkkarma";
    pub const AUTHOR_KARMA: &str = "authorkarma";
    pub const AUTHOR_IS_GOLD: &str = "authorisgold";

    /// Fields that can be used in queries.
    pub const SEARCHABLE: [&str; 6] = [TEXT, ID, SUBREDDIT, META, TIME, AUTHOR];

    /// Every stored field, in display order.
    pub const ALL: [&str; 11] = [
        TEXT, ID, SUBREDDIT, META, TIME, AUTHOR, UPS, DOWNS, AUTHOR_LINK_KARMA, AUTHOR_KARMA, AUTHOR_IS_GOLD,
    ];
}

/// Handle to a document of an index.
///
/// Only meaningful for the index (or sub-index) that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocRef {
    pub segment: u32,
    pub doc: u32,
}

impl DocRef {
    pub fn new(segment: u32, doc: u32) -> Self { Self { segment, doc } }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}:{}", self.segment, self.doc) }
}

/// One Reddit comment as stored in the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub subreddit: String,
    pub meta: String,
    pub time: String,
    pub author: String,
    pub ups: i64,
    pub downs: i64,
    pub author_link_karma: i64,
    pub author_karma: i64,
    pub author_is_gold: bool,
}

impl Post {
    /// Render a field by its index name, for result display.
    pub fn field_display(&self, name: &str) -> Result<String> {
        let value = match name {
            fields::TEXT => self.text.clone(),
            fields::ID => self.id.clone(),
            fields::SUBREDDIT => self.subreddit.clone(),
            fields::META => self.meta.clone(),
            fields::TIME => self.time.clone(),
            fields::AUTHOR => self.author.clone(),
            fields::UPS => self.ups.to_string(),
            fields::DOWNS => self.downs.to_string(),
            fields::AUTHOR_LINK_KARMA => self.author_link_karma.to_string(),
            fields::AUTHOR_KARMA => self.author_karma.to_string(),
            fields::AUTHOR_IS_GOLD => self.author_is_gold.to_string(),
            other => return Err(Error::UnknownField(other.to_string())),
        };
        Ok(value)
    }
}

/// A ranked search result.
///
/// `score` is the engine's relevance score, higher is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc: DocRef,
    pub score: f32,
    pub post: Post,
}
