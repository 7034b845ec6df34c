//! Application configuration. API credentials, endpoints, scan settings.

use crate::domain::{Competitor, DomainError, Threshold};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Accepted number of articles per scan.
pub const ARTICLE_LIMIT_RANGE: RangeInclusive<usize> = 3..=10;
pub const DEFAULT_ARTICLE_LIMIT: usize = 5;

/// Accepted attention thresholds: 50..=100 in steps of 5.
pub const THRESHOLD_RANGE: RangeInclusive<u8> = 50..=100;
pub const THRESHOLD_STEP: u8 = 5;
pub const DEFAULT_THRESHOLD: u8 = 70;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fallback credential variable, read after SIGNAL_SCAN_AI_API_KEY.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Competitor display name or slug. Read from SIGNAL_SCAN_COMPETITOR.
    #[serde(default)]
    pub competitor: Option<String>,

    /// Articles per scan (3..=10). Read from SIGNAL_SCAN_ARTICLE_LIMIT.
    #[serde(default)]
    pub article_limit: Option<usize>,

    /// Attention threshold (50..=100, step 5). Read from SIGNAL_SCAN_THRESHOLD.
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Run the demo generator instead of a live model. Read from SIGNAL_SCAN_DEMO.
    #[serde(default)]
    pub demo: Option<bool>,

    /// Organization the analysis is written for. Read from SIGNAL_SCAN_ORGANIZATION.
    #[serde(default)]
    pub organization: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// AI API key. Read from SIGNAL_SCAN_AI_API_KEY (OPENAI_API_KEY as fallback).
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from SIGNAL_SCAN_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// AI model name. Defaults to "gpt-4o-mini". Read from SIGNAL_SCAN_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // News Source Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// News feed base URL. Read from SIGNAL_SCAN_NEWS_BASE_URL.
    #[serde(default)]
    pub news_base_url: Option<String>,

    /// Per-request HTTP timeout in seconds (default 30). Read from SIGNAL_SCAN_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Validated scan settings. `competitor` is None when it should be prompted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    pub competitor: Option<Competitor>,
    pub article_limit: usize,
    pub threshold: Threshold,
}

impl AppConfig {
    /// Load `.env`, then an optional file named by SIGNAL_SCAN_CONFIG, then SIGNAL_SCAN_* variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("SIGNAL_SCAN_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("SIGNAL_SCAN"));
        c.build()?.try_deserialize()
    }

    /// Parse a TOML document. Used for config files given inline.
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Validate scan settings, applying defaults for unset values.
    pub fn scan_settings(&self) -> Result<ScanSettings, DomainError> {
        let competitor = self
            .competitor
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<Competitor>)
            .transpose()?;
        Ok(ScanSettings {
            competitor,
            article_limit: validate_article_limit(
                self.article_limit.unwrap_or(DEFAULT_ARTICLE_LIMIT),
            )?,
            threshold: validate_threshold(self.threshold.unwrap_or(DEFAULT_THRESHOLD))?,
        })
    }

    pub fn is_demo(&self) -> bool {
        self.demo.unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve the credential: explicit value first, then config/env, then OPENAI_API_KEY.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Result<String, DomainError> {
        self.resolve_api_key_with(explicit, |name| std::env::var(name).ok())
    }

    /// Same as [`Self::resolve_api_key`] with an injectable environment lookup.
    pub fn resolve_api_key_with<F>(
        &self,
        explicit: Option<&str>,
        lookup: F,
    ) -> Result<String, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: String| {
            let key = key.trim().to_string();
            (!key.is_empty()).then_some(key)
        };
        explicit
            .map(str::to_string)
            .and_then(non_blank)
            .or_else(|| self.ai_api_key.clone().and_then(non_blank))
            .or_else(|| lookup(OPENAI_API_KEY_ENV).and_then(non_blank))
            .ok_or(DomainError::MissingCredential)
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| crate::adapters::ai::openai_adapter::DEFAULT_API_URL.to_string())
    }

    /// Returns the AI model name. Defaults to "gpt-4o-mini".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| crate::adapters::ai::openai_adapter::DEFAULT_MODEL.to_string())
    }

    pub fn organization_or_default(&self) -> String {
        self.organization
            .clone()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| crate::usecases::signal_analyzer::DEFAULT_ORGANIZATION.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // News Source Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the news feed base URL. Defaults to Google News.
    pub fn news_base_url_or_default(&self) -> String {
        self.news_base_url.clone().unwrap_or_else(|| {
            crate::adapters::news::google_rss::DEFAULT_NEWS_BASE_URL.to_string()
        })
    }

    /// Returns the HTTP timeout. Defaults to 30s; zero is treated as unset.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

pub fn validate_article_limit(limit: usize) -> Result<usize, DomainError> {
    if !ARTICLE_LIMIT_RANGE.contains(&limit) {
        return Err(DomainError::Config(format!(
            "article limit {} outside {}..={}",
            limit,
            ARTICLE_LIMIT_RANGE.start(),
            ARTICLE_LIMIT_RANGE.end()
        )));
    }
    Ok(limit)
}

pub fn validate_threshold(value: u8) -> Result<Threshold, DomainError> {
    if !THRESHOLD_RANGE.contains(&value) || value % THRESHOLD_STEP != 0 {
        return Err(DomainError::Config(format!(
            "threshold {} must be within {}..={} in steps of {}",
            value,
            THRESHOLD_RANGE.start(),
            THRESHOLD_RANGE.end(),
            THRESHOLD_STEP
        )));
    }
    Threshold::new(value)
}

/// Threshold values offered in interactive mode.
pub fn threshold_choices() -> Vec<u8> {
    THRESHOLD_RANGE.step_by(THRESHOLD_STEP as usize).collect()
}

/// Article counts offered in interactive mode.
pub fn article_limit_choices() -> Vec<usize> {
    ARTICLE_LIMIT_RANGE.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let s = AppConfig::default().scan_settings().unwrap();
        assert_eq!(s.competitor, None);
        assert_eq!(s.article_limit, 5);
        assert_eq!(s.threshold.value(), 70);
    }

    #[test]
    fn reads_toml_file_values() {
        let cfg = AppConfig::from_toml_str(
            r#"
competitor = "arista-networks"
article_limit = 8
threshold = 85
demo = true
ai_model = "gpt-4o"
"#,
        )
        .unwrap();
        let s = cfg.scan_settings().unwrap();
        assert_eq!(s.competitor, Some(Competitor::AristaNetworks));
        assert_eq!(s.article_limit, 8);
        assert_eq!(s.threshold.value(), 85);
        assert!(cfg.is_demo());
        assert_eq!(cfg.ai_model_or_default(), "gpt-4o");
        assert_eq!(
            cfg.ai_api_url_or_default(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn rejects_out_of_bounds_settings() {
        assert!(validate_article_limit(2).is_err());
        assert!(validate_article_limit(11).is_err());
        assert!(validate_article_limit(3).is_ok());
        assert!(validate_threshold(45).is_err());
        assert!(validate_threshold(72).is_err());
        assert!(validate_threshold(100).is_ok());

        let cfg = AppConfig {
            competitor: Some("Cisco".into()),
            ..Default::default()
        };
        assert!(matches!(cfg.scan_settings(), Err(DomainError::Config(_))));
    }

    #[test]
    fn credential_precedence() {
        let cfg = AppConfig {
            ai_api_key: Some("from-config".into()),
            ..Default::default()
        };
        let env = |_: &str| Some("from-env".to_string());
        assert_eq!(
            cfg.resolve_api_key_with(Some("explicit"), env).unwrap(),
            "explicit"
        );
        assert_eq!(cfg.resolve_api_key_with(None, env).unwrap(), "from-config");
        assert_eq!(
            AppConfig::default().resolve_api_key_with(None, env).unwrap(),
            "from-env"
        );
    }

    #[test]
    fn missing_credential() {
        let err = AppConfig::default()
            .resolve_api_key_with(None, |_| None)
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingCredential));

        let blank = AppConfig::default().resolve_api_key_with(Some("  "), |_| None);
        assert!(matches!(blank, Err(DomainError::MissingCredential)));
    }

    #[test]
    fn blank_explicit_key_falls_through() {
        let key = AppConfig::default()
            .resolve_api_key_with(Some(""), |_| Some("sk-env".to_string()))
            .unwrap();
        assert_eq!(key, "sk-env");
    }

    #[test]
    fn interactive_choices() {
        assert_eq!(threshold_choices(), vec![50, 55, 60, 65, 70, 75, 80, 85, 90, 95, 100]);
        assert_eq!(article_limit_choices(), (3..=10).collect::<Vec<_>>());
    }

    #[test]
    fn zero_timeout_uses_default() {
        let cfg = AppConfig {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    }
}
