//! Session-scoped pipeline state
//!
//! One [`JobFinderSession`] owns the chunk store, the vector index, the
//! service clients, and the cached profile for the lifetime of a run. The
//! index only grows; ingesting a new document invalidates the cached
//! profile so the next use triggers a fresh retrieval, generation, and
//! parse cycle.

use crate::config::Config;
use crate::error::{JobFinderError, Result};
use crate::llm::client::{ChatClient, EmbeddingClient};
use crate::llm::prompts::{grounded_prompt, PROFILE_EXTRACTION_INSTRUCTION};
use crate::matching::normalizer::{normalize_postings, FilterDiagnostics};
use crate::matching::ranking::rank_postings;
use crate::matching::scorer::{score_postings, ScoredPosting};
use crate::matching::taxonomy::SkillTaxonomy;
use crate::profile::{parse_profile, ResumeProfile};
use crate::rag::chunker::ChunkStore;
use crate::rag::index::{EmbeddedChunk, VectorIndex};
use crate::sources::RawPosting;
use log::{debug, info};

pub struct JobFinderSession {
    store: ChunkStore,
    index: VectorIndex,
    embedding: EmbeddingClient,
    chat: ChatClient,
    taxonomy: SkillTaxonomy,
    chunk_size: usize,
    chunk_overlap: usize,
    batch_size: usize,
    top_k: usize,
    cached_profile: Option<ResumeProfile>,
}

impl JobFinderSession {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            store: ChunkStore::new(),
            index: VectorIndex::new(),
            embedding: EmbeddingClient::new(&config.services)?,
            chat: ChatClient::new(&config.services)?,
            taxonomy: SkillTaxonomy::new(),
            chunk_size: config.processing.chunk_size,
            chunk_overlap: config.processing.chunk_overlap,
            batch_size: config.processing.batch_size,
            top_k: config.processing.top_k,
            cached_profile: None,
        })
    }

    /// Number of chunks indexed so far.
    pub fn indexed_chunks(&self) -> usize {
        self.index.len()
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Chunk, embed, and index a document. Invalidates the cached profile.
    /// Returns the number of chunks added.
    pub async fn ingest(&mut self, text: &str, source: &str) -> Result<usize> {
        let new_chunks = self
            .store
            .add_document(text, source, self.chunk_size, self.chunk_overlap)?
            .to_vec();
        info!("split {} into {} chunks", source, new_chunks.len());

        for batch in new_chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = self.embedding.embed(&texts).await?;

            for (chunk, vector) in batch.iter().zip(vectors) {
                self.index.add(EmbeddedChunk {
                    chunk_id: chunk.id.clone(),
                    vector,
                    document_text: chunk.text.clone(),
                });
            }
            debug!("indexed batch of {} chunks", batch.len());
        }

        self.cached_profile = None;
        Ok(new_chunks.len())
    }

    /// Texts of the `k` stored chunks nearest to `query`.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        let query_vector = self
            .embedding
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| JobFinderError::ServiceUnavailable {
                service: "embedding".to_string(),
                detail: "empty embedding response".to_string(),
            })?;

        Ok(self
            .index
            .search(&query_vector, k)
            .into_iter()
            .map(|entry| entry.document_text.clone())
            .collect())
    }

    /// Retrieve grounding chunks for `instruction` and ask the chat
    /// service, returning its unprocessed response text.
    pub async fn generate(&self, instruction: &str) -> Result<String> {
        let retrieved = self.retrieve(instruction, self.top_k).await?;
        let prompt = grounded_prompt(&retrieved, instruction);
        self.chat.chat(&prompt).await
    }

    /// The structured resume profile, extracted on first use and after any
    /// ingest invalidated the cache.
    pub async fn profile(&mut self) -> Result<ResumeProfile> {
        if let Some(profile) = &self.cached_profile {
            return Ok(profile.clone());
        }

        let raw = self.generate(PROFILE_EXTRACTION_INSTRUCTION).await?;
        let profile = parse_profile(&raw)?;
        info!(
            "extracted profile: {} skills, {} years experience",
            profile.skills.len(),
            profile.total_years_experience
        );

        self.cached_profile = Some(profile.clone());
        Ok(profile)
    }

    /// Normalize, score, and rank raw postings against a profile,
    /// returning the ordered list plus the filter diagnostics.
    pub fn rank_postings(
        &self,
        raw_postings: &[RawPosting],
        profile: &ResumeProfile,
        location: &str,
        accepted_domains: &[String],
    ) -> (Vec<ScoredPosting>, FilterDiagnostics) {
        let (normalized, diagnostics) =
            normalize_postings(raw_postings, profile, &self.taxonomy, location, accepted_domains);
        let scored = score_postings(profile, &normalized, &self.taxonomy);
        (rank_postings(scored), diagnostics)
    }
}
