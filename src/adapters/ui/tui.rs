//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Menu loop: pick competitor and settings, scan with a spinner, render the
//! report, then collect feedback on each high-attention signal.

use crate::domain::{
    Competitor, DomainError, FeedbackTally, FeedbackVerdict, ScanReport, ScanRequest, Threshold,
};
use crate::ports::{InputPort, ReportSink};
use crate::shared::config::{ScanSettings, article_limit_choices, threshold_choices};
use crate::usecases::ScanService;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const MENU_SCAN: &str = "Scan market signals";
const MENU_EXIT: &str = "Exit";

const FEEDBACK_OPTIONS: [(&str, FeedbackVerdict); 3] = [
    ("Useful", FeedbackVerdict::Useful),
    ("Not useful", FeedbackVerdict::NotUseful),
    ("Skip", FeedbackVerdict::Skipped),
];

/// Applies the neon prompt theme to every subsequent inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("▶").with_fg(Color::LightRed));
    inquire::set_global_render_config(config);
}

fn prompt_error(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Cursor position of `value` in `options`, or 0.
fn index_of<T: PartialEq>(options: &[T], value: &T) -> usize {
    options.iter().position(|o| o == value).unwrap_or(0)
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    scan_service: Arc<ScanService>,
    sink: Arc<dyn ReportSink>,
    defaults: ScanSettings,
}

impl TuiInputPort {
    pub fn new(
        scan_service: Arc<ScanService>,
        sink: Arc<dyn ReportSink>,
        defaults: ScanSettings,
    ) -> Self {
        Self {
            scan_service,
            sink,
            defaults,
        }
    }

    fn prompt_request(&self) -> Result<ScanRequest, InquireError> {
        let competitors = Competitor::ALL.to_vec();
        let start = self
            .defaults
            .competitor
            .map(|c| index_of(&competitors, &c))
            .unwrap_or(0);
        let competitor = Select::new("Select competitor to monitor", competitors)
            .with_starting_cursor(start)
            .prompt()?;

        let limits = article_limit_choices();
        let start = index_of(&limits, &self.defaults.article_limit);
        let article_limit = Select::new("Number of recent articles to analyze", limits)
            .with_starting_cursor(start)
            .prompt()?;

        let thresholds = threshold_choices();
        let start = index_of(&thresholds, &self.defaults.threshold.value());
        let threshold = Select::new("Attention score threshold", thresholds)
            .with_starting_cursor(start)
            .prompt()?;

        Ok(ScanRequest {
            competitor,
            article_limit,
            threshold: Threshold::new(threshold)
                .map_err(|e| InquireError::Custom(Box::new(e)))?,
        })
    }

    async fn scan_with_spinner(&self, request: ScanRequest) -> ScanReport {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!(
            "Fetching and analyzing latest signals for {}...",
            request.competitor
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let report = self.scan_service.run(request).await;
        spinner.finish_and_clear();
        report
    }

    /// Ask for a verdict on each high-attention signal. Cancel stops asking.
    fn collect_feedback(&self, report: &ScanReport) -> Result<FeedbackTally, DomainError> {
        let mut tally = FeedbackTally::default();
        for signal in &report.high {
            let labels: Vec<&str> = FEEDBACK_OPTIONS.iter().map(|(l, _)| *l).collect();
            let answer = Select::new(
                &format!("Was \"{}\" useful?", signal.item.title),
                labels,
            )
            .prompt();
            let verdict = match answer {
                Ok(label) => FEEDBACK_OPTIONS
                    .iter()
                    .find(|(l, _)| *l == label)
                    .map(|(_, v)| *v)
                    .unwrap_or(FeedbackVerdict::Skipped),
                Err(e) if is_cancel(&e) => break,
                Err(e) => return Err(prompt_error(e)),
            };
            info!(
                title = %signal.item.title,
                link = %signal.item.link,
                score = signal.analysis.attention_score,
                %verdict,
                "signal feedback"
            );
            tally.record(verdict);
        }
        Ok(tally)
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new("What next?", vec![MENU_SCAN, MENU_EXIT]).prompt() {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(prompt_error(e)),
            };
            if choice == MENU_EXIT {
                return Ok(());
            }

            let request = match self.prompt_request() {
                Ok(r) => r,
                Err(e) if is_cancel(&e) => continue,
                Err(e) => return Err(prompt_error(e)),
            };

            let report = self.scan_with_spinner(request).await;
            self.sink.publish(&report)?;

            if !report.high.is_empty() {
                let tally = self.collect_feedback(&report)?;
                if tally.total() > 0 {
                    println!(
                        "Feedback recorded for this session: {} useful, {} not useful, {} skipped.",
                        tally.useful, tally.not_useful, tally.skipped
                    );
                }
            }
        }
    }
}
