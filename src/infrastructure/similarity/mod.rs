//! Similarity scorer implementations

mod embedding;

pub use embedding::{DEFAULT_EMBEDDING_MODEL, EmbeddingSimilarityScorer};
