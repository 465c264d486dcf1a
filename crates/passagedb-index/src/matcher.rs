//! Two-stage search: best chunk across the corpus, then best line inside it.
//!
//! Stage 1 compares the query against the precomputed chunk embeddings of
//! every document. Stage 2 embeds only the lines of the winning chunk, on
//! demand, and picks the closest one.

use std::ops::Range;
use tracing::debug;

use passagedb_core::error::{Error, Result};
use passagedb_core::traits::Embedder;
use passagedb_core::types::MatchResult;

use crate::index::{check_batch, CorpusIndex, IndexedDocument};
use crate::similarity::{argmax, cosine_scores};

/// Result of the coarse stage.
#[derive(Debug, Clone, PartialEq)]
pub enum CoarseMatch<'a> {
    Unmatched,
    Matched {
        document: &'a IndexedDocument,
        range: Range<usize>,
        score: f32,
    },
}

impl CoarseMatch<'_> {
    /// Score a candidate has to beat. Unmatched counts as 0.
    fn threshold(&self) -> f32 {
        match self {
            CoarseMatch::Unmatched => 0.0,
            CoarseMatch::Matched { score, .. } => *score,
        }
    }
}

/// Result of the fine stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FineMatch<'a> {
    pub lines: &'a [String],
    pub best_line: usize,
    pub score: f32,
}

impl FineMatch<'_> {
    pub fn best_line_text(&self) -> &str {
        &self.lines[self.best_line]
    }
}

/// Best chunk across the whole index.
///
/// A document takes over only with a score strictly above the current best,
/// so the earliest document wins ties and nothing at or below 0 ever matches.
pub fn search_chunks<'a>(query_embedding: &[f32], index: &'a CorpusIndex) -> CoarseMatch<'a> {
    index
        .documents()
        .iter()
        .filter(|doc| doc.is_searchable())
        .fold(CoarseMatch::Unmatched, |best, doc| {
            let scores = cosine_scores(query_embedding, &doc.embeddings);
            match argmax(&scores).and_then(|(i, score)| Some((doc.chunks.get(i)?, score))) {
                Some((chunk, score)) if score > best.threshold() => {
                    debug!(doc = %doc.name, chunk = chunk.start, score, "new best chunk");
                    CoarseMatch::Matched { document: doc, range: chunk.range(), score }
                }
                _ => best,
            }
        })
}

/// Best line within `range` of `document`. Lines are embedded here, in one batch.
pub fn search_lines<'a>(
    query_embedding: &[f32],
    document: &'a IndexedDocument,
    range: Range<usize>,
    embedder: &dyn Embedder,
) -> Result<FineMatch<'a>> {
    let lines = document.slice(range.clone()).ok_or_else(|| {
        Error::NotFound(format!("lines {}..{} of '{}'", range.start, range.end, document.name))
    })?;
    let embeddings = embedder.embed_batch(lines).map_err(Error::embedding)?;
    check_batch(&embeddings, lines.len(), embedder.dim(), &document.name)?;
    let scores = cosine_scores(query_embedding, &embeddings);
    let (best_line, score) = argmax(&scores).ok_or(Error::NoMatchFound)?;
    debug!(doc = %document.name, line = range.start + best_line, score, "best line");
    Ok(FineMatch { lines, best_line, score })
}

/// Runs both stages against a built index.
pub struct TwoStageMatcher<'a> {
    index: &'a CorpusIndex,
    embedder: &'a dyn Embedder,
}

impl<'a> TwoStageMatcher<'a> {
    pub fn new(index: &'a CorpusIndex, embedder: &'a dyn Embedder) -> Self {
        Self { index, embedder }
    }

    pub fn search(&self, query: &str) -> Result<MatchResult> {
        let query_embedding = self.embedder.embed_one(query).map_err(Error::embedding)?;
        self.search_embedding(&query_embedding)
    }

    pub fn search_embedding(&self, query_embedding: &[f32]) -> Result<MatchResult> {
        let (document, range, score) = match search_chunks(query_embedding, self.index) {
            CoarseMatch::Matched { document, range, score } => (document, range, score),
            CoarseMatch::Unmatched => return Err(Error::NoMatchFound),
        };
        let fine = search_lines(query_embedding, document, range.clone(), self.embedder)?;
        Ok(MatchResult {
            doc_id: document.name.clone(),
            range,
            lines: fine.lines.to_vec(),
            best_line: fine.best_line,
            score,
        })
    }
}
