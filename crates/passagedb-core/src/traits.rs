use crate::types::Embedding;

/// Maps text to fixed-length vectors.
///
/// `embed_batch` must return exactly one vector per input, in input order.
/// Every vector produced by one embedder has length `dim()`.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Embedding>>;

    fn embed_one(&self, text: &str) -> anyhow::Result<Embedding> {
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("embedder returned no vector for a single input"))
    }
}
