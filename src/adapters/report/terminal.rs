//! Colored terminal rendering of a scan report.

use crate::domain::{AnalysisOrigin, DomainError, ScanReport, ScoredSignal};
use crate::ports::ReportSink;
use crossterm::QueueableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write, stdout};

const ALERT: Color = Color::Rgb {
    r: 0xff,
    g: 0x5f,
    b: 0x57,
};
const ACCENT: Color = Color::Rgb {
    r: 0x0f,
    g: 0xf0,
    b: 0xfc,
};
const MUTED: Color = Color::DarkGrey;
const NOTICE: Color = Color::Yellow;

/// Writes a human-readable report to stdout.
#[derive(Debug, Default)]
pub struct TerminalReport;

impl TerminalReport {
    pub fn new() -> Self {
        Self
    }

    /// Render `report` into any writer. Colors are emitted as ANSI sequences.
    pub fn render<W: Write>(&self, report: &ScanReport, out: &mut W) -> io::Result<()> {
        heading(
            out,
            &format!(
                "Competitor signals: {} (threshold {}, up to {} articles)",
                report.competitor, report.threshold, report.article_limit
            ),
            ACCENT,
        )?;
        if report.demo {
            line(out, "Demo mode: analyses are generated, not from a live model.", NOTICE)?;
        }

        if report.no_news() {
            if let Some(warning) = &report.source_warning {
                line(out, &format!("Warning: {}", warning), NOTICE)?;
            }
            line(out, "No news items found for this competitor right now.", NOTICE)?;
            out.flush()?;
            return Ok(());
        }

        rule(out)?;
        heading(out, "High-Attention Signals", ALERT)?;
        if report.nothing_urgent() {
            line(
                out,
                &format!(
                    "No signals crossed the attention threshold of {}. \
                     This is still useful: it means nothing urgent has surfaced in the last few articles.",
                    report.threshold
                ),
                MUTED,
            )?;
        }
        for signal in &report.high {
            card(out, signal)?;
        }

        rule(out)?;
        heading(out, "Other Recent Signals (Below Threshold)", ACCENT)?;
        if report.other.is_empty() {
            line(out, "No additional items to display.", MUTED)?;
        }
        for signal in &report.other {
            out.queue(Print(format!(
                "- {} · {} · Attention Score: {}\n",
                signal.item.title, signal.analysis.signal_type, signal.analysis.attention_score
            )))?;
            if !signal.item.link.is_empty() {
                line(out, &format!("  {}", signal.item.link), MUTED)?;
            }
        }

        if !report.dropped.is_empty() {
            rule(out)?;
            heading(out, "Skipped Items", NOTICE)?;
            for dropped in &report.dropped {
                out.queue(Print(format!("- {}\n", dropped.title)))?;
                line(out, &format!("  {}", dropped.reason), MUTED)?;
            }
        }

        out.flush()
    }
}

fn heading<W: Write>(out: &mut W, text: &str, color: Color) -> io::Result<()> {
    out.queue(SetForegroundColor(color))?
        .queue(SetAttribute(Attribute::Bold))?
        .queue(Print(text))?
        .queue(SetAttribute(Attribute::Reset))?
        .queue(ResetColor)?
        .queue(Print("\n"))?;
    Ok(())
}

fn line<W: Write>(out: &mut W, text: &str, color: Color) -> io::Result<()> {
    out.queue(SetForegroundColor(color))?
        .queue(Print(text))?
        .queue(ResetColor)?
        .queue(Print("\n"))?;
    Ok(())
}

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    line(out, &"─".repeat(60), MUTED)
}

fn card<W: Write>(out: &mut W, signal: &ScoredSignal) -> io::Result<()> {
    let a = &signal.analysis;
    out.queue(Print("\n"))?;
    heading(out, &format!("{}: {}", a.signal_type, signal.item.title), Color::White)?;
    if !signal.item.link.is_empty() {
        line(out, &signal.item.link, MUTED)?;
    }
    line(
        out,
        &format!(
            "Attention Score: {}/100 | Model confidence: {:.2}",
            a.attention_score, a.confidence
        ),
        ALERT,
    )?;
    if signal.origin == AnalysisOrigin::QuotaFallback {
        line(out, "(fallback record: inference quota exhausted)", NOTICE)?;
    }

    heading(out, "Insight Summary", ACCENT)?;
    out.queue(Print(format!("{}\n", a.summary)))?;
    heading(out, "Why This Matters", ACCENT)?;
    out.queue(Print(format!("{}\n", a.why_it_matters)))?;
    heading(out, "Recommended Next Actions", ACCENT)?;
    for action in &a.next_actions {
        out.queue(Print(format!("- {}\n", action)))?;
    }
    line(out, &format!("Internal reasoning: {}", a.reasoning), MUTED)
}

impl ReportSink for TerminalReport {
    fn publish(&self, report: &ScanReport) -> Result<(), DomainError> {
        let mut out = stdout().lock();
        self.render(report, &mut out)
            .map_err(|e| DomainError::Output(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Competitor, DroppedItem, RawNewsItem, SignalAnalysis, Threshold,
    };
    use chrono::Utc;

    fn signal(title: &str, score: u8, origin: AnalysisOrigin) -> ScoredSignal {
        ScoredSignal {
            item: RawNewsItem::new(title, "s", format!("https://n/{title}")),
            analysis: SignalAnalysis {
                attention_score: score,
                signal_type: "Partnership".into(),
                summary: "Summary text.".into(),
                why_it_matters: "Matters text.".into(),
                next_actions: vec!["Act one".into(), "Act two".into(), "Act three".into()],
                confidence: 0.876,
                reasoning: "Because.".into(),
            },
            origin,
        }
    }

    fn report() -> ScanReport {
        ScanReport {
            competitor: Competitor::Fortinet,
            threshold: Threshold::new(70).unwrap(),
            article_limit: 5,
            fetched: 3,
            source_warning: None,
            high: vec![signal("Big deal", 88, AnalysisOrigin::QuotaFallback)],
            other: vec![signal("Small news", 30, AnalysisOrigin::Model)],
            dropped: vec![DroppedItem {
                title: "Broken".into(),
                link: String::new(),
                reason: "Malformed model response: no JSON object found in reply".into(),
            }],
            demo: false,
            scanned_at: Utc::now(),
        }
    }

    fn render(report: &ScanReport) -> String {
        let mut buf = Vec::new();
        TerminalReport::new().render(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_cards_and_lists() {
        let text = render(&report());
        assert!(text.contains("Partnership: Big deal"));
        assert!(text.contains("Attention Score: 88/100 | Model confidence: 0.88"));
        assert!(text.contains("- Act two"));
        assert!(text.contains("fallback record"));
        assert!(text.contains("- Small news · Partnership · Attention Score: 30"));
        assert!(text.contains("- Broken"));
    }

    #[test]
    fn says_when_nothing_crossed_threshold() {
        let mut r = report();
        r.high.clear();
        let text = render(&r);
        assert!(text.contains("No signals crossed the attention threshold of 70."));
    }

    #[test]
    fn says_when_no_news() {
        let mut r = report();
        r.fetched = 0;
        r.high.clear();
        r.other.clear();
        r.dropped.clear();
        r.source_warning = Some("News source unavailable: HTTP 503".into());
        let text = render(&r);
        assert!(text.contains("No news items found for this competitor right now."));
        assert!(text.contains("Warning: News source unavailable: HTTP 503"));
        assert!(!text.contains("High-Attention Signals"));
    }
}
