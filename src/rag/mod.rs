//! Retrieval-augmented extraction: chunking and vector retrieval

pub mod chunker;
pub mod index;
