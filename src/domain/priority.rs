//! Threshold-based prioritization of analyzed signals.

use super::entities::{RawNewsItem, ScoredSignal, SignalAnalysis, Threshold};
use serde::Serialize;

/// Anything carrying an attention score.
pub trait Scored {
    fn attention_score(&self) -> u8;
}

impl Scored for SignalAnalysis {
    fn attention_score(&self) -> u8 {
        self.attention_score
    }
}

impl Scored for (RawNewsItem, SignalAnalysis) {
    fn attention_score(&self) -> u8 {
        self.1.attention_score
    }
}

impl Scored for ScoredSignal {
    fn attention_score(&self) -> u8 {
        self.analysis.attention_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    High,
    Other,
}

/// Boundary-inclusive: a score equal to the threshold is high.
pub fn bucket_for(score: u8, threshold: Threshold) -> Bucket {
    if score >= threshold.value() {
        Bucket::High
    } else {
        Bucket::Other
    }
}

/// Two ordered buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct Prioritized<T> {
    pub high: Vec<T>,
    pub other: Vec<T>,
}

impl<T> Default for Prioritized<T> {
    fn default() -> Self {
        Self {
            high: Vec::new(),
            other: Vec::new(),
        }
    }
}

/// Partition in a single stable pass. Each item is judged on its own against `threshold`.
pub fn prioritize<T, I>(items: I, threshold: Threshold) -> Prioritized<T>
where
    T: Scored,
    I: IntoIterator<Item = T>,
{
    let mut out = Prioritized::default();
    for item in items {
        match bucket_for(item.attention_score(), threshold) {
            Bucket::High => out.high.push(item),
            Bucket::Other => out.other.push(item),
        }
    }
    out
}
