//! Domain types shared by the loader, the index and the matcher.

use std::ops::Range;

pub type DocId = String;
pub type Embedding = Vec<f32>;

/// A source document after blank-line removal.
///
/// - `name`: file stem of the source file
/// - `lines`: trimmed, non-empty lines in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: DocId,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(name: impl Into<DocId>, lines: Vec<String>) -> Self {
        Self { name: name.into(), lines }
    }
}

/// An overlapping window of consecutive lines.
///
/// `start..end` indexes into the parent document's `lines`; `content` is those
/// lines joined by a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
    pub content: String,
}

impl Chunk {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The outcome of a two-stage search.
///
/// `lines` is the slice spanned by the winning chunk, `best_line` indexes into
/// it. `score` is the chunk-level cosine similarity from the coarse stage.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub doc_id: DocId,
    pub range: Range<usize>,
    pub lines: Vec<String>,
    pub best_line: usize,
    pub score: f32,
}

impl MatchResult {
    pub fn best_line_text(&self) -> &str {
        &self.lines[self.best_line]
    }
}
