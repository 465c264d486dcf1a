//! passagedb-index
//!
//! In-memory chunk index and the two-stage matcher built on it.

pub mod index;
pub mod matcher;
pub mod similarity;

pub use index::{CorpusIndex, IndexStats, IndexedDocument};
pub use matcher::{search_chunks, search_lines, CoarseMatch, FineMatch, TwoStageMatcher};
