//! CSV ingestion of Reddit comment dumps.
//!
//! Each file carries a header row and a leading row-number column, both
//! ignored. The remaining columns are, in order:
//! `text, id, subreddit, meta, time, author, ups, downs, authorlinkkarma,
//! authorkarma, authorisgold`.

use csv::{ByteRecord, ReaderBuilder};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Post;

pub const COLUMNS: usize = 12;

#[derive(Default)]
pub struct PostReader;

impl PostReader {
    pub fn new() -> Self { Self }

    /// CSV files directly under `folder`, sorted by name. Subfolders are not visited.
    pub fn list_csv_files(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(Error::NotFound(format!("no such directory: {}", folder.display())));
        }
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(folder).min_depth(1).max_depth(1).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("csv") { files.push(path.to_path_buf()); }
        }
        files.sort();
        Ok(files)
    }

    pub fn read_posts(&self, path: &Path) -> Result<Vec<Post>> {
        let mut reader = ReaderBuilder::new().has_headers(true).flexible(true).from_path(path)?;
        let mut posts = Vec::new();
        let mut record = ByteRecord::new();
        while reader.read_byte_record(&mut record)? {
            let line = record.position().map_or(0, csv::Position::line);
            if record.len() != COLUMNS {
                return Err(Error::MalformedRecord { path: path.to_path_buf(), line, expected: COLUMNS, found: record.len() });
            }
            posts.push(Self::parse_record(&record, path, line));
        }
        Ok(posts)
    }

    fn parse_record(record: &ByteRecord, path: &Path, line: u64) -> Post {
        let text = |i: usize| String::from_utf8_lossy(&record[i]).into_owned();
        let number = |i: usize, name: &str| {
            let raw = text(i);
            raw.trim().parse::<i64>().unwrap_or_else(|_| {
                if !raw.trim().is_empty() {
                    tracing::warn!(file = %path.display(), line, column = name, value = %raw, "not an integer, storing 0");
                }
                0
            })
        };
        Post {
            text: text(1),
            id: text(2),
            subreddit: text(3),
            meta: text(4),
            time: text(5),
            author: text(6),
            ups: number(7, "ups"),
            downs: number(8, "downs"),
            author_link_karma: number(9, "authorlinkkarma"),
            author_karma: number(10, "authorkarma"),
            author_is_gold: parse_flag(&text(11)),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw == "1" || raw.eq_ignore_ascii_case("true")
}
