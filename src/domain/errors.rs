//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// News fetch failed. Surfaced as a warning; the scan yields empty results.
    #[error("News source unavailable: {0}")]
    SourceUnavailable(String),

    /// Inference call failed for a reason other than quota/rate limiting. Item is dropped.
    #[error("Inference call failed: {0}")]
    InferenceTransport(String),

    /// Inference call hit quota or rate limits. Recovered with the fallback record.
    #[error("Inference quota exhausted: {0}")]
    InferenceQuotaExhausted(String),

    /// Inference succeeded but the text is not a valid analysis. Item is dropped.
    #[error("Malformed model response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    /// No inference credential could be resolved. Fatal for the whole scan.
    #[error(
        "No API key: pass --api-key, set SIGNAL_SCAN_AI_API_KEY or OPENAI_API_KEY, or use --demo"
    )]
    MissingCredential,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Prompt failed: {0}")]
    Ui(String),

    #[error("Report output failed: {0}")]
    Output(String),
}
