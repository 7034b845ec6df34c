//! Machine-readable report output for headless runs.

use crate::domain::{DomainError, ScanReport};
use crate::ports::ReportSink;
use std::io::{Write, stdout};

/// Writes the full report as pretty JSON to stdout.
#[derive(Debug, Default)]
pub struct JsonReport;

impl JsonReport {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &ScanReport) -> Result<String, DomainError> {
        serde_json::to_string_pretty(report).map_err(|e| DomainError::Output(e.to_string()))
    }
}

impl ReportSink for JsonReport {
    fn publish(&self, report: &ScanReport) -> Result<(), DomainError> {
        let json = self.render(report)?;
        let mut out = stdout().lock();
        writeln!(out, "{}", json).map_err(|e| DomainError::Output(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Competitor, Threshold};
    use chrono::Utc;

    #[test]
    fn empty_report_serializes_buckets_and_counts() {
        let report = ScanReport {
            competitor: Competitor::HpeAruba,
            threshold: Threshold::new(75).unwrap(),
            article_limit: 5,
            fetched: 0,
            source_warning: None,
            high: vec![],
            other: vec![],
            dropped: vec![],
            demo: true,
            scanned_at: Utc::now(),
        };
        let json = JsonReport::new().render(&report).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["competitor"], "hpe-aruba");
        assert_eq!(v["threshold"], 75);
        assert_eq!(v["fetched"], 0);
        assert!(v["high"].as_array().unwrap().is_empty());
        assert_eq!(v["demo"], true);

        let back: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
