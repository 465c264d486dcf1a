use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::ops::Range;
use tracing::{debug, info};

use passagedb_core::chunker::chunk_lines;
use passagedb_core::error::{Error, Result};
use passagedb_core::traits::Embedder;
use passagedb_core::types::{Chunk, Document, Embedding};

/// One document with its chunks and their embeddings.
///
/// `chunks[i]` is embedded as `embeddings[i]`. `lines` is kept whole so the
/// matcher can re-slice a winning chunk line by line.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDocument {
    pub name: String,
    pub lines: Vec<String>,
    pub chunks: Vec<Chunk>,
    pub embeddings: Vec<Embedding>,
}

impl IndexedDocument {
    /// Documents shorter than the window have no chunks and never match.
    pub fn is_searchable(&self) -> bool {
        !self.chunks.is_empty()
    }

    pub fn slice(&self, range: Range<usize>) -> Option<&[String]> {
        self.lines.get(range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub documents: usize,
    pub searchable_documents: usize,
    pub chunks: usize,
}

/// In-memory chunk index over a corpus, built once and then only read.
///
/// Documents keep the order they were given in; that order decides which
/// document wins when two score the same.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    documents: Vec<IndexedDocument>,
    window_size: usize,
}

impl CorpusIndex {
    /// Chunk every document and embed each document's chunks in one batch call.
    ///
    /// Any embedding failure aborts the whole build.
    pub fn build(documents: Vec<Document>, window_size: usize, embedder: &dyn Embedder) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidConfig("window size must be at least 1".into()));
        }
        info!("Indexing {} documents (window = {} lines)", documents.len(), window_size);
        let pb = ProgressBar::with_draw_target(Some(documents.len() as u64), ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut indexed = Vec::with_capacity(documents.len());
        for doc in documents {
            pb.set_message(doc.name.clone());
            indexed.push(index_document(doc, window_size, embedder)?);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let index = Self { documents: indexed, window_size };
        let stats = index.stats();
        info!(
            "Indexed {} chunks from {}/{} searchable documents",
            stats.chunks, stats.searchable_documents, stats.documents
        );
        Ok(index)
    }

    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    pub fn get(&self, name: &str) -> Option<&IndexedDocument> {
        self.documents.iter().find(|d| d.name == name)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn is_empty(&self) -> bool {
        self.documents.iter().all(|d| !d.is_searchable())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.documents.len(),
            searchable_documents: self.documents.iter().filter(|d| d.is_searchable()).count(),
            chunks: self.documents.iter().map(|d| d.chunks.len()).sum(),
        }
    }
}

fn index_document(doc: Document, window_size: usize, embedder: &dyn Embedder) -> Result<IndexedDocument> {
    let chunks = chunk_lines(&doc.lines, window_size);
    let embeddings = if chunks.is_empty() {
        debug!(doc = %doc.name, lines = doc.lines.len(), "shorter than window, not searchable");
        Vec::new()
    } else {
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).map_err(Error::embedding)?;
        check_batch(&embeddings, texts.len(), embedder.dim(), &doc.name)?;
        embeddings
    };
    debug!(doc = %doc.name, chunks = chunks.len(), "indexed document");
    Ok(IndexedDocument { name: doc.name, lines: doc.lines, chunks, embeddings })
}

/// The provider must answer one vector of `dim` values per input.
pub(crate) fn check_batch(embeddings: &[Embedding], expected: usize, dim: usize, doc: &str) -> Result<()> {
    if embeddings.len() != expected {
        return Err(Error::Embedding(format!(
            "expected {} vectors for '{}', got {}",
            expected,
            doc,
            embeddings.len()
        )));
    }
    if let Some(bad) = embeddings.iter().find(|e| e.len() != dim) {
        return Err(Error::Embedding(format!(
            "vector of length {} for '{}', expected {}",
            bad.len(),
            doc,
            dim
        )));
    }
    Ok(())
}
