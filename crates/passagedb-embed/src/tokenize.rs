use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;

/// Cut `ids`/`mask` to `max_len` tokens. A sequence that ended in `sep_id`
/// still ends in it afterwards.
pub fn truncate_keeping_sep(ids: &mut Vec<u32>, mask: &mut Vec<u32>, max_len: usize, sep_id: Option<u32>) {
    if ids.len() <= max_len {
        return;
    }
    let ends_with_sep = sep_id.is_some() && ids.last().copied() == sep_id;
    ids.truncate(max_len);
    mask.truncate(max_len);
    if let (true, Some(sep), Some(last)) = (ends_with_sep, sep_id, ids.last_mut()) {
        *last = sep;
    }
}

/// Tokenize a batch and pad it to the longest sequence (capped at `max_len`).
///
/// Returns `(input_ids, attention_mask)`, both `[B, T]` of `u32`.
pub fn tokenize_batch(
    tokenizer: &Tokenizer,
    texts: &[String],
    max_len: usize,
    pad_id: u32,
    sep_id: Option<u32>,
    device: &Device,
) -> Result<(Tensor, Tensor)> {
    let mut rows = Vec::with_capacity(texts.len());
    for text in texts {
        let enc = tokenizer.encode(text.as_str(), true).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        let mut ids = enc.get_ids().to_vec();
        let mut mask = enc.get_attention_mask().to_vec();
        truncate_keeping_sep(&mut ids, &mut mask, max_len, sep_id);
        rows.push((ids, mask));
    }
    let seq_len = rows.iter().map(|(ids, _)| ids.len()).max().unwrap_or(0).max(1);

    let mut all_ids = Vec::with_capacity(rows.len() * seq_len);
    let mut all_mask = Vec::with_capacity(rows.len() * seq_len);
    for (ids, mask) in rows {
        let pad = seq_len - ids.len();
        all_ids.extend(ids);
        all_ids.extend(std::iter::repeat(pad_id).take(pad));
        all_mask.extend(mask);
        all_mask.extend(std::iter::repeat(0u32).take(pad));
    }
    let input_ids = Tensor::from_vec(all_ids, (texts.len(), seq_len), device)?;
    let attention_mask = Tensor::from_vec(all_mask, (texts.len(), seq_len), device)?;
    Ok((input_ids, attention_mask))
}
