//! Overlapping fixed-size text chunking

use crate::error::{JobFinderError, Result};
use uuid::Uuid;

/// A bounded window of a source document, the unit of vector retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub source_document: String,
}

/// Split `text` into consecutive windows of `size` characters, each pair of
/// neighbors sharing `overlap` characters. The final window may be shorter;
/// text shorter than `size` yields a single chunk equal to the full text.
///
/// Requires `0 < overlap < size`.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>> {
    if size == 0 || overlap == 0 || overlap >= size {
        return Err(JobFinderError::InvalidInput(format!(
            "chunking requires 0 < overlap < size, got size={} overlap={}",
            size, overlap
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() < size {
        return Ok(vec![text.to_string()]);
    }

    let stride = size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        start += stride;
    }

    Ok(chunks)
}

/// Owns every chunk produced during the session.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Split a document and store the pieces, assigning each a fresh id.
    /// Returns the newly stored chunks.
    pub fn add_document(
        &mut self,
        text: &str,
        source: &str,
        size: usize,
        overlap: usize,
    ) -> Result<&[Chunk]> {
        let first_new = self.chunks.len();
        for piece in chunk_text(text, size, overlap)? {
            self.chunks.push(Chunk {
                id: Uuid::new_v4().to_string(),
                text: piece,
                source_document: source.to_string(),
            });
        }
        Ok(&self.chunks[first_new..])
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("hello", 100, 10).unwrap();
        assert_eq!(chunks, vec!["hello".to_string()]);
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = chunk_text(text, 10, 3).unwrap();

        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(pair[0].chars().count() - 3).collect();
            let head: String = pair[1].chars().take(3).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_round_trip_reconstruction() {
        let text = "The quick brown fox jumps over the lazy dog, again and again and again.";
        let size = 16;
        let overlap = 5;
        let chunks = chunk_text(text, size, overlap).unwrap();

        let mut rebuilt: String = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(overlap));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(chunk_text("text", 10, 0).is_err());
        assert!(chunk_text("text", 10, 10).is_err());
        assert!(chunk_text("text", 0, 0).is_err());
    }

    #[test]
    fn test_store_assigns_unique_ids() {
        let mut store = ChunkStore::new();
        let added = store
            .add_document("abcdefghijklmnop", "resume.txt", 8, 2)
            .unwrap()
            .to_vec();

        assert!(added.len() > 1);
        let mut ids: Vec<&str> = added.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), added.len());
        assert!(added.iter().all(|c| c.source_document == "resume.txt"));
    }

    #[test]
    fn test_store_accumulates_across_documents() {
        let mut store = ChunkStore::new();
        store.add_document("first document", "a.txt", 100, 10).unwrap();
        assert_eq!(store.len(), 1);
        store.add_document("second document", "b.txt", 100, 10).unwrap();
        assert_eq!(store.len(), 2);
    }
}
