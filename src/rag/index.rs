//! In-memory vector index with cosine nearest-neighbor retrieval

/// An embedded chunk as stored by the index: id, vector, and the original
/// text the vector was computed from.
#[derive(Debug, Clone)]
pub struct EmbeddedChunk {
    pub chunk_id: String,
    pub vector: Vec<f32>,
    pub document_text: String,
}

/// Session-scoped vector store. Entries accumulate monotonically; there is
/// no deletion.
#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<EmbeddedChunk>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add(&mut self, entry: EmbeddedChunk) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` entries nearest to `query` by cosine similarity, most similar
    /// first. Ties keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<&EmbeddedChunk> {
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .take(k)
            .map(|(i, _)| &self.entries[i])
            .collect()
    }
}

/// Cosine similarity between two vectors; 0.0 when either norm is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, vector: Vec<f32>, text: &str) -> EmbeddedChunk {
        EmbeddedChunk {
            chunk_id: id.to_string(),
            vector,
            document_text: text.to_string(),
        }
    }

    #[test]
    fn test_cosine_similarity_parallel_and_orthogonal() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let mut index = VectorIndex::new();
        index.add(entry("a", vec![0.0, 1.0], "orthogonal"));
        index.add(entry("b", vec![1.0, 0.0], "aligned"));
        index.add(entry("c", vec![1.0, 1.0], "diagonal"));

        let results = index.search(&[1.0, 0.0], 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document_text, "aligned");
        assert_eq!(results[1].document_text, "diagonal");
    }

    #[test]
    fn test_search_ties_keep_insertion_order() {
        let mut index = VectorIndex::new();
        index.add(entry("first", vec![1.0, 0.0], "first"));
        index.add(entry("second", vec![2.0, 0.0], "second"));

        let results = index.search(&[1.0, 0.0], 2);
        assert_eq!(results[0].chunk_id, "first");
        assert_eq!(results[1].chunk_id, "second");
    }

    #[test]
    fn test_search_k_larger_than_index() {
        let mut index = VectorIndex::new();
        index.add(entry("only", vec![1.0], "only"));
        assert_eq!(index.search(&[1.0], 5).len(), 1);
    }
}
