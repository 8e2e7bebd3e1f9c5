//! Similarity domain - how faithfully a summary reflects its source data

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Length metrics reported next to the similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMetrics {
    pub similarity_score: f32,
    /// Raw data length in whitespace-separated words
    pub raw_data_length: usize,
    /// Summary length in whitespace-separated words
    pub summary_length: usize,
}

/// Score in `[0, 1]` plus metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub score: f32,
    pub metrics: SimilarityMetrics,
}

impl SimilarityReport {
    /// Builds a report for `raw`/`summary`, clamping `score` into `[0, 1]`
    pub fn new(score: f32, raw: &str, summary: &str) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };

        Self {
            score,
            metrics: SimilarityMetrics {
                similarity_score: score,
                raw_data_length: word_count(raw),
                summary_length: word_count(summary),
            },
        }
    }
}

/// Scores how close a summary is to the raw text it was generated from
#[async_trait]
pub trait SimilarityScorer: Send + Sync + Debug {
    async fn score(&self, raw: &str, summary: &str) -> Result<SimilarityReport, DomainError>;
}

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let v = vec![0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_report_clamps_and_counts_words() {
        let report = SimilarityReport::new(-0.25, "one two  three", "one");

        assert_eq!(report.score, 0.0);
        assert_eq!(report.metrics.raw_data_length, 3);
        assert_eq!(report.metrics.summary_length, 1);
    }
}
