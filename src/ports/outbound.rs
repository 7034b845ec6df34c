//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, RawNewsItem, ScanReport};

/// News source. Turns a competitor name into recent articles.
#[async_trait::async_trait]
pub trait NewsSourcePort: Send + Sync {
    /// Fetch up to `max_items` recent items about `competitor`, in the source's natural order.
    ///
    /// An empty result is valid (no matching news). Fetch failures map to
    /// `DomainError::SourceUnavailable`.
    async fn fetch(
        &self,
        competitor: &str,
        max_items: usize,
    ) -> Result<Vec<RawNewsItem>, DomainError>;

    /// Source name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Instruction sent to a language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Language-model inference. Returns free-form text that should, but need not, be one JSON object.
#[async_trait::async_trait]
pub trait InferencePort: Send + Sync {
    /// Run one completion.
    ///
    /// # Errors
    /// * `DomainError::InferenceQuotaExhausted` when the provider reports quota or rate limiting
    /// * `DomainError::InferenceTransport` for every other failure
    async fn complete(&self, prompt: &Prompt) -> Result<String, DomainError>;

    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Presentation sink. Consumes a finished scan.
pub trait ReportSink: Send + Sync {
    fn publish(&self, report: &ScanReport) -> Result<(), DomainError>;
}
