//! Collecting relevance judgements from the user.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};

use redsearch_core::types::{DocRef, SearchHit};

/// Result numbers (1-based, as displayed) judged relevant and non-relevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Judgements {
    pub relevant: Vec<usize>,
    pub nonrelevant: Vec<usize>,
}

impl Judgements {
    pub fn is_empty(&self) -> bool { self.relevant.is_empty() && self.nonrelevant.is_empty() }

    /// Map result numbers onto the documents of `hits`.
    pub fn resolve(&self, hits: &[SearchHit]) -> Result<(Vec<DocRef>, Vec<DocRef>)> {
        let pick = |numbers: &[usize]| -> Result<Vec<DocRef>> {
            let mut docs = Vec::with_capacity(numbers.len());
            for &n in numbers {
                match n.checked_sub(1).and_then(|i| hits.get(i)) {
                    Some(hit) => { if !docs.contains(&hit.doc) { docs.push(hit.doc); } }
                    None => bail!("result {n} does not exist (showing 1-{})", hits.len()),
                }
            }
            Ok(docs)
        };
        let relevant = pick(&self.relevant)?;
        let nonrelevant = pick(&self.nonrelevant)?;
        if let Some(both) = relevant.iter().find(|d| nonrelevant.contains(*d)) {
            bail!("document {both} is marked both relevant and non-relevant");
        }
        Ok((relevant, nonrelevant))
    }
}

/// Parse "1, 3 4" into result numbers.
pub fn parse_selection(line: &str) -> Result<Vec<usize>> {
    let mut numbers = Vec::new();
    for part in line.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty()) {
        match part.parse::<usize>() {
            Ok(n) => numbers.push(n),
            Err(_) => bail!("'{part}' is not a result number"),
        }
    }
    Ok(numbers)
}

/// Ask for one round of judgements. `None` means the user is done: both
/// answers were empty or the input ended.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, hits: &[SearchHit]) -> Result<Option<(Vec<DocRef>, Vec<DocRef>)>> {
    loop {
        writeln!(output, "\nMark results for query expansion (numbers separated by spaces or commas, leave both empty to stop).")?;
        let Some(relevant) = ask_line(input, output, "Relevant: ")? else { return Ok(None) };
        let Some(nonrelevant) = ask_line(input, output, "Non-relevant: ")? else { return Ok(None) };
        let judgements = match (parse_selection(&relevant), parse_selection(&nonrelevant)) {
            (Ok(relevant), Ok(nonrelevant)) => Judgements { relevant, nonrelevant },
            (Err(e), _) | (_, Err(e)) => { writeln!(output, "{e}")?; continue; }
        };
        if judgements.is_empty() { return Ok(None); }
        match judgements.resolve(hits) {
            Ok(docs) => return Ok(Some(docs)),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

fn ask_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 { return Ok(None); }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use redsearch_core::types::Post;
    use std::io::Cursor;

    fn hits(n: u32) -> Vec<SearchHit> {
        (0..n).map(|i| SearchHit { doc: DocRef::new(0, i * 10), score: 1.0, post: Post::default() }).collect()
    }

    #[test]
    fn parse_selection_accepts_commas_and_spaces() {
        assert_eq!(parse_selection(" 1, 3 4,,").unwrap(), vec![1, 3, 4]);
        assert!(parse_selection("").unwrap().is_empty());
        assert!(parse_selection("1 two").is_err());
    }

    #[test]
    fn resolve_maps_numbers_to_documents() {
        let j = Judgements { relevant: vec![1, 3, 1], nonrelevant: vec![2] };
        let (rel, non) = j.resolve(&hits(3)).unwrap();
        assert_eq!(rel, vec![DocRef::new(0, 0), DocRef::new(0, 20)]);
        assert_eq!(non, vec![DocRef::new(0, 10)]);
    }

    #[test]
    fn resolve_rejects_out_of_range_and_overlap() {
        assert!(Judgements { relevant: vec![0], nonrelevant: vec![] }.resolve(&hits(2)).is_err());
        assert!(Judgements { relevant: vec![3], nonrelevant: vec![] }.resolve(&hits(2)).is_err());
        assert!(Judgements { relevant: vec![1], nonrelevant: vec![1] }.resolve(&hits(2)).is_err());
    }

    #[test]
    fn ask_retries_after_bad_input() {
        let mut input = Cursor::new("x\n\n1\n2\n");
        let mut output = Vec::new();
        let docs = ask(&mut input, &mut output, &hits(2)).unwrap();
        assert_eq!(docs, Some((vec![DocRef::new(0, 0)], vec![DocRef::new(0, 10)])));
        assert!(String::from_utf8(output).unwrap().contains("'x' is not a result number"));
    }

    #[test]
    fn ask_stops_on_empty_answers_or_eof() {
        let mut output = Vec::new();
        assert_eq!(ask(&mut Cursor::new("\n\n"), &mut output, &hits(2)).unwrap(), None);
        assert_eq!(ask(&mut Cursor::new(""), &mut output, &hits(2)).unwrap(), None);
    }
}
