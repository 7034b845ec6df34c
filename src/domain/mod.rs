//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod demo;
pub mod entities;
pub mod errors;
pub mod priority;

pub use demo::{DemoAnalysis, Level};
pub use entities::{
    AnalysisOrigin, Competitor, DroppedItem, FeedbackTally, FeedbackVerdict, RawNewsItem,
    ScanReport, ScanRequest, ScoredSignal, SignalAnalysis, Threshold,
};
pub use errors::DomainError;
pub use priority::{Bucket, Prioritized, Scored, bucket_for, prioritize};
