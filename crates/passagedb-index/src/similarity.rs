//! Cosine similarity over L2-normalised vectors.

/// Euclidean norm.
fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Unit-length copy of `v`, or `None` for a zero vector.
pub fn l2_normalize(v: &[f32]) -> Option<Vec<f32>> {
    let n = norm(v);
    if n == 0.0 {
        return None;
    }
    Some(v.iter().map(|x| x / n).collect())
}

/// Cosine similarity in `[-1, 1]`: dot product of the two L2-normalised
/// vectors. Zero vectors and length mismatches score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    match l2_normalize(a) {
        Some(unit) => unit_cosine(&unit, b),
        None => 0.0,
    }
}

fn unit_cosine(unit: &[f32], b: &[f32]) -> f32 {
    if unit.len() != b.len() {
        return 0.0;
    }
    l2_normalize(b).map_or(0.0, |other| dot(unit, &other))
}

/// Similarity of `query` against every candidate, index-aligned with `candidates`.
///
/// The query is normalised once; each candidate is normalised before the dot product.
pub fn cosine_scores<V: AsRef<[f32]>>(query: &[f32], candidates: &[V]) -> Vec<f32> {
    match l2_normalize(query) {
        Some(unit) => candidates.iter().map(|c| unit_cosine(&unit, c.as_ref())).collect(),
        None => vec![0.0; candidates.len()],
    }
}

/// Position and value of the maximum; the first occurrence wins ties.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut iter = scores.iter().copied().enumerate();
    let first = iter.next()?;
    Some(iter.fold(first, |best, cur| if cur.1 > best.1 { cur } else { best }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_ignores_magnitude() {
        let a = [0.3, 0.4, 0.5];
        let b = [3.0, 4.0, 5.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_is_dot_of_normalised_vectors() {
        let a = [0.1, 0.7, -0.3, 2.5];
        let b = [1.3, -0.2, 0.4, 0.9];
        let expected = dot(&l2_normalize(&a).unwrap(), &l2_normalize(&b).unwrap());
        assert_eq!(cosine_similarity(&a, &b).to_bits(), expected.to_bits());
        assert_eq!(cosine_scores(&a, &[b.to_vec()])[0].to_bits(), expected.to_bits());
        assert_eq!(l2_normalize(&[0.0, 0.0]), None);
        assert_eq!(cosine_scores(&[0.0, 0.0], &[vec![1.0, 0.0]]), vec![0.0]);
    }

    #[test]
    fn argmax_first_occurrence_wins() {
        assert_eq!(argmax(&[0.2, 0.7, 0.7, 0.1]), Some((1, 0.7)));
        assert_eq!(argmax(&[0.5]), Some((0, 0.5)));
        assert_eq!(argmax(&[-0.5, -0.2]), Some((1, -0.2)));
        assert_eq!(argmax(&[]), None);
    }
}
