//! Prompting and result rendering for the `passagedb` binary.

use std::io::{BufRead, Write};

use passagedb_core::error::{Error, Result as CoreResult};
use passagedb_core::types::MatchResult;
use passagedb_index::{CorpusIndex, TwoStageMatcher};
use tracing_subscriber::EnvFilter;

pub const NO_MATCH_MESSAGE: &str = "No matching passage found.";

/// Log to stderr. `RUST_LOG` wins over the configured level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Context lines of the winning chunk, best line marked, score as a percentage.
pub fn render_match(result: &MatchResult) -> String {
    let mut out = format!("\n📖 Best match from: {}\n🧩 Context:\n", result.doc_id);
    for (i, line) in result.lines.iter().enumerate() {
        if i == result.best_line {
            out.push_str(&format!(">>> {}  <<<\n", line));
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(&format!("\n🔍 Similarity: {:.2}%\n", result.score * 100.0));
    out
}

/// Print a search outcome. "No match" is a normal answer; other errors propagate.
pub fn write_outcome<W: Write>(out: &mut W, outcome: CoreResult<MatchResult>) -> anyhow::Result<()> {
    match outcome {
        Ok(result) => write!(out, "{}", render_match(&result))?,
        Err(Error::NoMatchFound) => writeln!(out, "{}", NO_MATCH_MESSAGE)?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Read one line after `prompt`. `None` on end of input.
pub fn read_query<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> anyhow::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string()))
}

/// Ask once, answer once.
pub fn run_once<R: BufRead, W: Write>(matcher: &TwoStageMatcher<'_>, input: &mut R, out: &mut W) -> anyhow::Result<()> {
    let query = read_query(input, out, "Enter your query: ")?.unwrap_or_default();
    write_outcome(out, matcher.search(&query))
}

/// Keep answering queries against the same index until `/quit` or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    matcher: &TwoStageMatcher<'_>,
    index: &CorpusIndex,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "Type a query, /stats for index statistics, /quit to exit.")?;
    while let Some(line) = read_query(input, out, "search> ")? {
        let query = line.trim();
        match query {
            "" => continue,
            "/quit" | "/q" | "exit" => break,
            "/stats" | "/s" => {
                let stats = index.stats();
                writeln!(
                    out,
                    "{} documents ({} searchable), {} chunks, window {} lines",
                    stats.documents,
                    stats.searchable_documents,
                    stats.chunks,
                    index.window_size()
                )?;
            }
            _ => write_outcome(out, matcher.search(query))?,
        }
        writeln!(out)?;
    }
    Ok(())
}
