//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/RSS/LLM types here; adapters map into these.

use super::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Competitors the scanner knows how to monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Competitor {
    JuniperNetworks,
    AristaNetworks,
    PaloAltoNetworks,
    Fortinet,
    HpeAruba,
}

impl Competitor {
    pub const ALL: [Competitor; 5] = [
        Competitor::JuniperNetworks,
        Competitor::AristaNetworks,
        Competitor::PaloAltoNetworks,
        Competitor::Fortinet,
        Competitor::HpeAruba,
    ];

    /// Name used in news queries and prompts.
    pub fn display_name(self) -> &'static str {
        match self {
            Competitor::JuniperNetworks => "Juniper Networks",
            Competitor::AristaNetworks => "Arista Networks",
            Competitor::PaloAltoNetworks => "Palo Alto Networks",
            Competitor::Fortinet => "Fortinet",
            Competitor::HpeAruba => "HPE Aruba",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Competitor::JuniperNetworks => "juniper-networks",
            Competitor::AristaNetworks => "arista-networks",
            Competitor::PaloAltoNetworks => "palo-alto-networks",
            Competitor::Fortinet => "fortinet",
            Competitor::HpeAruba => "hpe-aruba",
        }
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Competitor {
    type Err = DomainError;

    /// Accepts the display name or the slug, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Competitor::ALL
            .into_iter()
            .find(|c| {
                c.display_name().eq_ignore_ascii_case(needle) || c.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| {
                DomainError::Config(format!(
                    "unknown competitor '{}' (expected one of: {})",
                    needle,
                    Competitor::ALL
                        .iter()
                        .map(|c| c.slug())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Attention threshold in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > Self::MAX {
            return Err(DomainError::Config(format!(
                "threshold {} out of range 0..={}",
                value,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Threshold {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for u8 {
    fn from(t: Threshold) -> Self {
        t.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single news article as delivered by a news source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNewsItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    /// Publication time, when the feed carries a parseable one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Publisher name, when the feed carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RawNewsItem {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            link: link.into(),
            published_at: None,
            source: None,
        }
    }
}

/// Structured relevance analysis for one news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalAnalysis {
    pub attention_score: u8,
    pub signal_type: String,
    pub summary: String,
    pub why_it_matters: String,
    pub next_actions: Vec<String>,
    pub confidence: f64,
    pub reasoning: String,
}

impl SignalAnalysis {
    /// Allowed number of next actions (inclusive).
    pub const NEXT_ACTIONS_MIN: usize = 3;
    pub const NEXT_ACTIONS_MAX: usize = 5;
}

/// Where an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOrigin {
    /// Parsed from inference output.
    Model,
    /// Fixed record substituted because inference quota was exhausted.
    QuotaFallback,
}

/// One news item paired with its analysis. Bucket membership is derived, see `priority`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSignal {
    pub item: RawNewsItem,
    pub analysis: SignalAnalysis,
    pub origin: AnalysisOrigin,
}

/// An item removed from the results, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedItem {
    pub title: String,
    pub link: String,
    pub reason: String,
}

/// Parameters of a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRequest {
    pub competitor: Competitor,
    pub article_limit: usize,
    pub threshold: Threshold,
}

/// Outcome of one scan, handed to a report sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub competitor: Competitor,
    pub threshold: Threshold,
    pub article_limit: usize,
    /// Number of news items the source returned.
    pub fetched: usize,
    /// Set when the news source could not be reached.
    pub source_warning: Option<String>,
    pub high: Vec<ScoredSignal>,
    pub other: Vec<ScoredSignal>,
    pub dropped: Vec<DroppedItem>,
    /// True when results came from the demo generator instead of a live model.
    pub demo: bool,
    pub scanned_at: DateTime<Utc>,
}

impl ScanReport {
    /// Nothing was fetched, so nothing could be analyzed.
    pub fn no_news(&self) -> bool {
        self.fetched == 0
    }

    /// News was fetched but no signal met the threshold.
    pub fn nothing_urgent(&self) -> bool {
        !self.no_news() && self.high.is_empty()
    }

    pub fn fallbacks_used(&self) -> usize {
        self.high
            .iter()
            .chain(self.other.iter())
            .filter(|s| s.origin == AnalysisOrigin::QuotaFallback)
            .count()
    }
}

/// Manual feedback on a surfaced signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVerdict {
    Useful,
    NotUseful,
    Skipped,
}

impl fmt::Display for FeedbackVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeedbackVerdict::Useful => "useful",
            FeedbackVerdict::NotUseful => "not useful",
            FeedbackVerdict::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// Session-only feedback counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTally {
    pub useful: usize,
    pub not_useful: usize,
    pub skipped: usize,
}

impl FeedbackTally {
    pub fn record(&mut self, verdict: FeedbackVerdict) {
        match verdict {
            FeedbackVerdict::Useful => self.useful += 1,
            FeedbackVerdict::NotUseful => self.not_useful += 1,
            FeedbackVerdict::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.useful + self.not_useful + self.skipped
    }
}
