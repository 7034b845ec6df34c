//! Adapter construction from configuration.
//!
//! The credential is resolved here, before any adapter exists, so a missing key
//! stops the run before anything is fetched or analyzed.

use crate::adapters::ai::{DemoAiAdapter, OpenAiAdapter};
use crate::adapters::news::GoogleNewsRss;
use crate::domain::DomainError;
use crate::ports::{InferencePort, NewsSourcePort};
use crate::shared::config::AppConfig;
use crate::usecases::{ScanService, SignalAnalyzer};
use std::sync::Arc;
use tracing::{info, warn};

/// Pick the inference adapter: demo when requested, otherwise OpenAI with a resolved key.
pub fn build_inference(
    cfg: &AppConfig,
    explicit_key: Option<&str>,
) -> Result<Arc<dyn InferencePort>, DomainError> {
    if cfg.is_demo() {
        warn!("demo mode: analyses are generated locally, no model is called");
        return Ok(Arc::new(DemoAiAdapter::new()));
    }

    let api_key = cfg.resolve_api_key(explicit_key)?;
    info!(
        model = %cfg.ai_model_or_default(),
        url = %cfg.ai_api_url_or_default(),
        key_len = api_key.len(),
        "AI analysis enabled with OpenAI adapter"
    );
    Ok(Arc::new(OpenAiAdapter::new(
        cfg.ai_api_url_or_default(),
        api_key,
        cfg.ai_model_or_default(),
        cfg.request_timeout(),
    )?))
}

pub fn build_news_source(cfg: &AppConfig) -> Result<Arc<dyn NewsSourcePort>, DomainError> {
    Ok(Arc::new(GoogleNewsRss::new(
        cfg.news_base_url_or_default(),
        cfg.request_timeout(),
    )?))
}

/// Wire a scan service from an already-chosen inference adapter.
pub fn build_scan_service_with(
    cfg: &AppConfig,
    inference: Arc<dyn InferencePort>,
) -> Result<ScanService, DomainError> {
    let analyzer = Arc::new(SignalAnalyzer::with_organization(
        inference,
        cfg.organization_or_default(),
    ));
    Ok(ScanService::new(build_news_source(cfg)?, analyzer).with_demo(cfg.is_demo()))
}

/// Wire the full scan service from configuration.
pub fn build_scan_service(
    cfg: &AppConfig,
    explicit_key: Option<&str>,
) -> Result<ScanService, DomainError> {
    let inference = build_inference(cfg, explicit_key)?;
    build_scan_service_with(cfg, inference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demo::Level;
    use crate::domain::{AnalysisOrigin, Competitor, ScanRequest, Threshold};

    const FEED: &str = r#"<rss version="2.0"><channel>
<item><title>Juniper wins telco deal</title><link>https://n/1</link><description>d1</description></item>
<item><title>Juniper opens lab</title><link>https://n/2</link><description>d2</description></item>
<item><title>Juniper CFO interview</title><link>https://n/3</link><description>d3</description></item>
</channel></rss>"#;

    #[test]
    fn live_mode_without_key_fails() {
        let cfg = AppConfig {
            ai_api_key: None,
            demo: Some(false),
            ..Default::default()
        };
        // OPENAI_API_KEY may exist on the host; only assert when it does not.
        if std::env::var("OPENAI_API_KEY").is_err() {
            assert!(matches!(
                build_inference(&cfg, None),
                Err(DomainError::MissingCredential)
            ));
        }
        assert!(build_inference(&cfg, Some("sk-explicit")).is_ok());
    }

    #[test]
    fn demo_mode_needs_no_key() {
        let cfg = AppConfig {
            demo: Some(true),
            ..Default::default()
        };
        let inference = build_inference(&cfg, None).unwrap();
        assert_eq!(inference.provider_name(), "demo");
    }

    #[tokio::test]
    async fn end_to_end_demo_scan() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rss/search")
            .match_query(mockito::Matcher::UrlEncoded(
                "q".into(),
                "Juniper Networks".into(),
            ))
            .with_status(200)
            .with_body(FEED)
            .create_async()
            .await;

        let cfg = AppConfig {
            demo: Some(true),
            news_base_url: Some(server.url()),
            ..Default::default()
        };
        let inference = Arc::new(
            DemoAiAdapter::new()
                .with_delay(0)
                .with_levels(Level::High, Level::High),
        );
        let service = build_scan_service_with(&cfg, inference).unwrap();
        let report = service
            .run(ScanRequest {
                competitor: Competitor::JuniperNetworks,
                article_limit: 3,
                threshold: Threshold::new(85).unwrap(),
            })
            .await;

        mock.assert_async().await;
        assert!(report.demo);
        assert_eq!(report.fetched, 3);
        assert_eq!(report.high.len(), 3);
        assert!(report.other.is_empty());
        assert!(report.high.iter().all(|s| s.origin == AnalysisOrigin::Model));
        let titles: Vec<&str> = report.high.iter().map(|s| s.item.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Juniper wins telco deal", "Juniper opens lab", "Juniper CFO interview"]
        );
    }
}
