//! Signal analyzer. One news item in, one structured analysis out.
//!
//! Builds the instruction, makes exactly one inference call, and decodes the
//! reply strictly. Quota exhaustion is the only failure that is substituted
//! (with a fixed record); everything else is returned to the caller.

use crate::domain::{AnalysisOrigin, DomainError, RawNewsItem, SignalAnalysis};
use crate::ports::{InferencePort, Prompt};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Organization the analysis is written for, unless configured otherwise.
pub const DEFAULT_ORGANIZATION: &str = "Cisco";

/// Longest raw reply kept inside a `MalformedResponse`.
const RAW_EXCERPT_LIMIT: usize = 2_000;

/// Analysis plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Analyzed {
    pub analysis: SignalAnalysis,
    pub origin: AnalysisOrigin,
}

pub struct SignalAnalyzer {
    inference: Arc<dyn InferencePort>,
    organization: String,
}

impl SignalAnalyzer {
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self::with_organization(inference, DEFAULT_ORGANIZATION)
    }

    pub fn with_organization(
        inference: Arc<dyn InferencePort>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            inference,
            organization: organization.into(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.inference.provider_name()
    }

    /// Analyze one item for `competitor`.
    ///
    /// # Errors
    /// * `DomainError::MalformedResponse` when the reply cannot be decoded
    /// * `DomainError::InferenceTransport` when the call fails for a non-quota reason
    pub async fn analyze(
        &self,
        item: &RawNewsItem,
        competitor: &str,
    ) -> Result<Analyzed, DomainError> {
        let prompt = build_prompt(&self.organization, item, competitor);

        let text = match self.inference.complete(&prompt).await {
            Ok(text) => text,
            Err(DomainError::InferenceQuotaExhausted(reason)) => {
                warn!(
                    provider = self.provider_name(),
                    title = %item.title,
                    %reason,
                    "inference quota exhausted; using fallback analysis"
                );
                return Ok(Analyzed {
                    analysis: fallback_analysis(&self.organization),
                    origin: AnalysisOrigin::QuotaFallback,
                });
            }
            Err(e) => return Err(e),
        };

        debug!(raw_len = text.len(), title = %item.title, "received inference reply");

        let analysis = parse_analysis(&text)?;
        Ok(Analyzed {
            analysis,
            origin: AnalysisOrigin::Model,
        })
    }
}

/// Render the fixed system and user instructions for one item.
pub fn build_prompt(organization: &str, item: &RawNewsItem, competitor: &str) -> Prompt {
    let system = format!(
        "You are a market intelligence analyst at {org}. \
         You analyze competitor/news signals and return strict JSON.",
        org = organization
    );

    let user = format!(
        r#"Analyze the following news item and return STRICT JSON with keys:
- attention_score: integer 0-100 (0 = ignore, 100 = mission critical)
- signal_type: short string like "New product", "Expansion", "M&A", "Partnership", "Regulation", "Competitive win"
- summary: 2–4 sentences summarizing the news in neutral, factual tone
- why_it_matters: 2–4 sentences explaining why this is (or is not) relevant to {org}
- next_actions: array of 3–5 concise next best actions for {org} sales / strategy / SPO teams
- confidence: number 0–1 (your confidence)
- reasoning: 2–3 sentences of internal reasoning (for internal use only)

If this is not relevant to {org}, set attention_score <= 40 and explain why.

Respond with ONLY a JSON object. No extra text.

Competitor: {competitor}

Title: {title}
Summary: {summary}
Link: {link}"#,
        org = organization,
        competitor = competitor,
        title = item.title,
        summary = item.summary,
        link = item.link,
    );

    Prompt { system, user }
}

/// Substring from the first `{` to the last `}` inclusive, if both exist in that order.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Wire shape of the model reply. Numeric fields are wide so range errors are reported, not wrapped.
#[derive(Deserialize)]
struct LlmSignal {
    attention_score: i64,
    signal_type: String,
    summary: String,
    why_it_matters: String,
    next_actions: Vec<String>,
    confidence: f64,
    reasoning: String,
}

impl TryFrom<LlmSignal> for SignalAnalysis {
    type Error = String;

    fn try_from(raw: LlmSignal) -> Result<Self, Self::Error> {
        let attention_score = u8::try_from(raw.attention_score)
            .ok()
            .filter(|s| *s <= 100)
            .ok_or_else(|| format!("attention_score {} outside 0..=100", raw.attention_score))?;

        if !raw.confidence.is_finite() || !(0.0..=1.0).contains(&raw.confidence) {
            return Err(format!("confidence {} outside 0..=1", raw.confidence));
        }

        let actions = raw.next_actions.len();
        if !(SignalAnalysis::NEXT_ACTIONS_MIN..=SignalAnalysis::NEXT_ACTIONS_MAX).contains(&actions)
        {
            return Err(format!(
                "next_actions has {} entries, expected {}..={}",
                actions,
                SignalAnalysis::NEXT_ACTIONS_MIN,
                SignalAnalysis::NEXT_ACTIONS_MAX
            ));
        }

        Ok(SignalAnalysis {
            attention_score,
            signal_type: raw.signal_type,
            summary: raw.summary,
            why_it_matters: raw.why_it_matters,
            next_actions: raw.next_actions,
            confidence: raw.confidence,
            reasoning: raw.reasoning,
        })
    }
}

/// Strict decode of a model reply. Missing or mistyped fields are rejected, never defaulted.
pub fn parse_analysis(text: &str) -> Result<SignalAnalysis, DomainError> {
    let malformed = |reason: String| DomainError::MalformedResponse {
        reason,
        raw: text.chars().take(RAW_EXCERPT_LIMIT).collect(),
    };

    let json = extract_json_object(text)
        .ok_or_else(|| malformed("no JSON object found in reply".to_string()))?;

    let raw: LlmSignal =
        serde_json::from_str(json).map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

    SignalAnalysis::try_from(raw).map_err(malformed)
}

/// Fixed record used when the inference provider is out of quota.
pub fn fallback_analysis(organization: &str) -> SignalAnalysis {
    SignalAnalysis {
        attention_score: 82,
        signal_type: "Competitor Expansion".to_string(),
        summary: "Competitor announced expansion impacting enterprise networking and AI-driven infrastructure.".to_string(),
        why_it_matters: format!(
            "This signals increased competition in areas overlapping with {}'s switching and security portfolio.",
            organization
        ),
        next_actions: vec![
            "Alert account teams for impacted industries".to_string(),
            "Prepare competitive positioning for sellers".to_string(),
            "Engage strategic partners early".to_string(),
        ],
        confidence: 0.85,
        reasoning: "Fallback demo response due to API quota limits.".to_string(),
    }
}
