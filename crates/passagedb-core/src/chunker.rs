//! Sliding line windows.
//!
//! A document of `L` lines and a window of `w` lines yields `L - w + 1` chunks
//! with ranges `0..w, 1..w+1, …, L-w..L`. Consecutive chunks share `w - 1`
//! lines. Documents shorter than the window yield nothing.

use crate::types::Chunk;

/// Split `lines` into overlapping windows of `window_size` lines, ordered by
/// start index. A `window_size` of zero yields no chunks.
pub fn chunk_lines<S: AsRef<str>>(lines: &[S], window_size: usize) -> Vec<Chunk> {
    if window_size == 0 {
        return Vec::new();
    }
    lines
        .windows(window_size)
        .enumerate()
        .map(|(start, window)| Chunk {
            start,
            end: start + window_size,
            content: window.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(" "),
        })
        .collect()
}

/// Number of chunks `chunk_lines` produces for `line_count` lines.
pub fn chunk_count(line_count: usize, window_size: usize) -> usize {
    if window_size == 0 || line_count < window_size {
        0
    } else {
        line_count - window_size + 1
    }
}
