use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use redsearch_core::config::{resolve_with_base, Config, ExpansionConfig, SearchConfig};
use redsearch_core::error::Error;
use redsearch_core::traits::TextSearch;
use redsearch_core::types::{fields, DocRef, SearchHit};
use redsearch_expand::expand_query;
use redsearch_text::{PostIndexer, PostSearcher};

use crate::args::{IndexArgs, SearchArgs};
use crate::feedback::{self, Judgements};

fn resolve(path: &str) -> Result<PathBuf> { Ok(resolve_with_base(&std::env::current_dir()?, path)) }

pub fn run_index(args: &IndexArgs, config: &Config) -> Result<()> {
    let folder = resolve(&args.folder)?;
    let index_dir = resolve(&args.index_dir)?;
    if !folder.is_dir() {
        return Err(Error::NotFound(format!("no such directory: {}", folder.display())).into());
    }
    println!("= MAKE INDEX =\n");
    println!("Database folder: {}", folder.display());
    println!("Index directory: {}", index_dir.display());

    let indexer = PostIndexer::create(index_dir, &config.analyzer()?)?;
    let stats = indexer.index_folder(&folder)?;
    println!("\n✅ Indexed {} posts from {} CSV files", stats.documents, stats.files);
    Ok(())
}

/// Effective search settings: flags override the `[search]` config section.
fn search_settings(args: &SearchArgs, config: &Config) -> Result<SearchConfig> {
    let mut settings = config.search()?;
    if let Some(top) = args.top { settings.top = top; }
    if let Some(field) = &args.default_field { settings.default_field.clone_from(field); }
    if let Some(result_fields) = &args.result_fields { settings.result_fields.clone_from(result_fields); }
    for name in &settings.result_fields {
        if !fields::ALL.contains(&name.as_str()) { return Err(Error::UnknownField(name.clone()).into()); }
    }
    Ok(settings)
}

pub fn run_search(args: &SearchArgs, config: &Config) -> Result<()> {
    let settings = search_settings(args, config)?;
    let expansion = config.expansion()?;
    let index_dir = resolve(&args.index_dir)?;
    let searcher = PostSearcher::open(&index_dir, &config.analyzer()?)?;

    if !args.json {
        println!("= SEARCH =\n");
        println!("Index directory: {}", index_dir.display());
        println!("Query expansion: {}", args.query_expansion);
    }

    let session = SearchSession { searcher: &searcher, settings: &settings, expansion: &expansion, json: args.json, interactive: args.query_expansion };
    let judgements = Judgements { relevant: args.relevant.clone(), nonrelevant: args.nonrelevant.clone() };
    let mut out = io::stdout();
    // Prompts and notices must not interleave with JSON result lines.
    let mut notices: Box<dyn Write> = if args.json { Box::new(io::stderr()) } else { Box::new(io::stdout()) };
    let outcome = session.run(args.query.clone(), judgements, &mut io::stdin().lock(), &mut out, &mut notices)?;
    tracing::debug!(query = %outcome.query, hits = outcome.hits.len(), rounds = outcome.rounds, "search finished");
    Ok(())
}

/// One search plus any relevance-feedback rounds that follow it.
struct SearchSession<'a> {
    searcher: &'a PostSearcher,
    settings: &'a SearchConfig,
    expansion: &'a ExpansionConfig,
    json: bool,
    interactive: bool,
}

/// Where a session ended up.
#[derive(Debug)]
struct SessionOutcome {
    query: String,
    hits: Vec<SearchHit>,
    rounds: usize,
}

impl SearchSession<'_> {
    /// Search `query`, then expand it once per round of judgements: first the
    /// ones given up front, then, when interactive, the ones read from `input`.
    /// Expanded queries are searched in the field their terms were scored on.
    /// Result lists go to `out`; prompts and notices go to `notices`.
    fn run<R: BufRead, W: Write, N: Write>(
        &self,
        mut query: String,
        judgements: Judgements,
        input: &mut R,
        out: &mut W,
        notices: &mut N,
    ) -> Result<SessionOutcome> {
        let mut hits = self.searcher.search(&query, self.settings.top, &self.settings.default_field)?;
        print_hits(out, &query, &hits, self.settings, self.json)?;

        let mut pending = Some(judgements).filter(|j| !j.is_empty());
        let mut rounds = 0;
        loop {
            let (relevant, nonrelevant): (Vec<DocRef>, Vec<DocRef>) = match pending.take() {
                Some(judgements) => judgements.resolve(&hits)?,
                None if self.interactive && !hits.is_empty() => match feedback::ask(input, notices, &hits)? {
                    Some(docs) => docs,
                    None => break,
                },
                None => break,
            };

            let expansion = expand_query(self.searcher.corpus(), &query, &relevant, &nonrelevant, self.expansion)?;
            if expansion.is_empty() {
                writeln!(notices, "\nExpanded query is empty, keeping '{query}'.")?;
                break;
            }
            query = expansion.query_string();
            let submitted = if self.expansion.boost { expansion.boosted_query_string() } else { query.clone() };
            tracing::info!(expanded = %query, field = %self.expansion.field, "query expanded");
            hits = self.searcher.search(&submitted, self.settings.top, &self.expansion.field)?;
            print_hits(out, &submitted, &hits, self.settings, self.json)?;
            rounds += 1;
        }
        Ok(SessionOutcome { query, hits, rounds })
    }
}

fn print_hits<W: Write>(out: &mut W, query: &str, hits: &[SearchHit], settings: &SearchConfig, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(&serde_json::json!({ "query": query, "hits": hits }))?)?;
        return Ok(());
    }
    writeln!(out, "\nQuery: '{query}'")?;
    writeln!(out, "🔍 Found {} results", hits.len())?;
    for (i, hit) in hits.iter().enumerate() {
        writeln!(out, "\n  {}. score={:.4}", i + 1, hit.score)?;
        for name in &settings.result_fields {
            writeln!(out, "     {name}: {}", hit.post.field_display(name)?)?;
        }
    }
    Ok(())
}
