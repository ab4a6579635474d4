//! Job-relevance matching: taxonomy, normalization, scoring, ranking

pub mod matchers;
pub mod normalizer;
pub mod ranking;
pub mod scorer;
pub mod taxonomy;
