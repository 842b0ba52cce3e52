//! Command line arguments.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};

/// Search Reddit comment dumps.
///
/// `index` builds an index from a folder of CSV files; `search` queries it,
/// optionally refining the query from results you mark as relevant or not.
#[derive(Parser, Debug)]
#[command(name = "redsearch", version = env!("CARGO_PKG_VERSION"))]
#[command(after_help = "Searchable fields: text, id, subreddit, meta, time, author\n\
Displayable fields: text, id, subreddit, meta, time, author, ups, downs, authorlinkkarma, authorkarma, authorisgold")]
pub struct Args {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new index from a folder of CSV files
    Index(IndexArgs),
    /// Run a search query
    Search(SearchArgs),
}

#[derive(ClapArgs, Debug)]
pub struct IndexArgs {
    /// Folder containing the CSV files (not searched recursively)
    pub folder: String,
    /// Directory of the index to create; existing content is replaced
    pub index_dir: String,
}

#[derive(ClapArgs, Debug)]
pub struct SearchArgs {
    /// Directory of a previously created index
    pub index_dir: String,
    /// Search query; other fields can be searched with field:value
    pub query: String,
    /// Maximum number of results to display
    #[arg(short, long)]
    pub top: Option<usize>,
    /// Default field of the query
    #[arg(short = 'd', long)]
    pub default_field: Option<String>,
    /// Fields to display for each result
    #[arg(short = 'r', long, num_args = 1..)]
    pub result_fields: Option<Vec<String>>,
    /// Ask for relevance feedback after each result list and expand the query
    #[arg(long = "qe", visible_alias = "query-expansion")]
    pub query_expansion: bool,
    /// Result numbers to treat as relevant for one expansion round
    #[arg(long, value_delimiter = ',')]
    pub relevant: Vec<usize>,
    /// Result numbers to treat as non-relevant for one expansion round
    #[arg(long, value_delimiter = ',')]
    pub nonrelevant: Vec<usize>,
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_feedback() {
        let args = Args::parse_from(["redsearch", "-vv", "search", "idx", "hubble telescope", "-t", "5", "--qe", "--relevant", "1,3", "--nonrelevant", "2", "-r", "author", "text"]);
        assert_eq!(args.verbose, 2);
        let Command::Search(search) = args.command else { panic!("expected search") };
        assert_eq!(search.query, "hubble telescope");
        assert_eq!(search.top, Some(5));
        assert!(search.query_expansion);
        assert_eq!(search.relevant, vec![1, 3]);
        assert_eq!(search.nonrelevant, vec![2]);
        assert_eq!(search.result_fields, Some(vec!["author".to_string(), "text".to_string()]));
    }

    #[test]
    fn parses_index() {
        let args = Args::parse_from(["redsearch", "index", "data", "out"]);
        let Command::Index(index) = args.command else { panic!("expected index") };
        assert_eq!((index.folder.as_str(), index.index_dir.as_str()), ("data", "out"));
    }
}
