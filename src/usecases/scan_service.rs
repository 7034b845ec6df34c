//! Scan use case: fetch news -> analyze each item -> prioritize.
//!
//! - A source failure yields an empty report with a warning, never an error
//! - Items are analyzed one at a time; a failed item is dropped and recorded
//! - Prioritization is the last step, against the request's threshold

use crate::domain::{
    DomainError, DroppedItem, ScanReport, ScanRequest, ScoredSignal, prioritize,
};
use crate::ports::NewsSourcePort;
use crate::usecases::signal_analyzer::SignalAnalyzer;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Scan service. Coordinates the news source, analyzer and prioritizer for one scan.
pub struct ScanService {
    source: Arc<dyn NewsSourcePort>,
    analyzer: Arc<SignalAnalyzer>,
    demo: bool,
}

impl ScanService {
    pub fn new(source: Arc<dyn NewsSourcePort>, analyzer: Arc<SignalAnalyzer>) -> Self {
        Self {
            source,
            analyzer,
            demo: false,
        }
    }

    /// Mark reports as produced by the demo generator.
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    /// Run one scan. Never fails: source and per-item failures are folded into the report.
    pub async fn run(&self, request: ScanRequest) -> ScanReport {
        let competitor = request.competitor.display_name();
        info!(
            competitor,
            limit = request.article_limit,
            threshold = %request.threshold,
            source = self.source.name(),
            provider = self.analyzer.provider_name(),
            "starting scan"
        );

        let mut report = ScanReport {
            competitor: request.competitor,
            threshold: request.threshold,
            article_limit: request.article_limit,
            fetched: 0,
            source_warning: None,
            high: Vec::new(),
            other: Vec::new(),
            dropped: Vec::new(),
            demo: self.demo,
            scanned_at: Utc::now(),
        };

        let mut items = match self.source.fetch(competitor, request.article_limit).await {
            Ok(items) => items,
            Err(e) => {
                warn!(competitor, error = %e, "news source unavailable");
                report.source_warning = Some(e.to_string());
                return report;
            }
        };
        items.truncate(request.article_limit);
        report.fetched = items.len();

        if items.is_empty() {
            warn!(competitor, "no news items found");
            return report;
        }

        let mut scored = Vec::with_capacity(items.len());
        for item in items {
            match self.analyzer.analyze(&item, competitor).await {
                Ok(analyzed) => scored.push(ScoredSignal {
                    item,
                    analysis: analyzed.analysis,
                    origin: analyzed.origin,
                }),
                Err(e) => {
                    match &e {
                        DomainError::MalformedResponse { reason, raw } => {
                            warn!(title = %item.title, %reason, raw = %raw, "dropping item: malformed model reply");
                        }
                        other => {
                            error!(title = %item.title, error = %other, "dropping item: inference failed");
                        }
                    }
                    report.dropped.push(DroppedItem {
                        title: item.title,
                        link: item.link,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let buckets = prioritize(scored, request.threshold);
        report.high = buckets.high;
        report.other = buckets.other;

        info!(
            competitor,
            fetched = report.fetched,
            high = report.high.len(),
            other = report.other.len(),
            dropped = report.dropped.len(),
            fallbacks = report.fallbacks_used(),
            "scan complete"
        );

        report
    }
}
