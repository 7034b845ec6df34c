//! Google News RSS adapter. Implements NewsSourcePort via the RSS search endpoint.

use crate::domain::{DomainError, RawNewsItem};
use crate::ports::NewsSourcePort;
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_NEWS_BASE_URL: &str = "https://news.google.com";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    source: Option<ItemSource>,
}

/// `<source url="...">Publisher</source>`; only the text is kept.
#[derive(Debug, Deserialize)]
struct ItemSource {
    #[serde(rename = "$text")]
    name: Option<String>,
}

/// Google News search feed.
pub struct GoogleNewsRss {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleNewsRss {
    /// # Arguments
    /// * `base_url` - Scheme and host, e.g. "https://news.google.com" (no trailing path)
    /// * `timeout` - Whole-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("signal-scan/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Parse an RSS document into items, in feed order.
    pub fn parse_feed(xml: &str) -> Result<Vec<RawNewsItem>, DomainError> {
        let rss: Rss = from_str(xml)
            .map_err(|e| DomainError::SourceUnavailable(format!("invalid RSS: {}", e)))?;

        Ok(rss
            .channel
            .item
            .into_iter()
            .map(|it| RawNewsItem {
                title: non_empty(it.title.as_deref().map(plain_text))
                    .unwrap_or_else(|| "No title".to_string()),
                summary: non_empty(it.description.as_deref().map(plain_text))
                    .unwrap_or_else(|| "No summary".to_string()),
                link: it.link.map(|l| l.trim().to_string()).unwrap_or_default(),
                published_at: it.pub_date.as_deref().and_then(parse_rfc2822),
                source: it
                    .source
                    .and_then(|s| s.name)
                    .and_then(|n| non_empty(Some(plain_text(&n)))),
            })
            .collect())
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

fn parse_rfc2822(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(ts.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Feed markup left after XML decoding. A `<` not followed by a tag name is text.
fn tag_pattern() -> &'static Regex {
    static RE_TAGS: OnceLock<Regex> = OnceLock::new();
    RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[a-z][^>]*>").expect("tag pattern is valid"))
}

fn whitespace_pattern() -> &'static Regex {
    static RE_WS: OnceLock<Regex> = OnceLock::new();
    RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Strip HTML tags, then decode entities and collapse whitespace.
///
/// Tags go first so an escaped `&lt;` in the source survives as a literal `<`.
pub fn plain_text(html: &str) -> String {
    let stripped = tag_pattern().replace_all(html, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    whitespace_pattern()
        .replace_all(&decoded, " ")
        .trim()
        .to_string()
}

#[async_trait::async_trait]
impl NewsSourcePort for GoogleNewsRss {
    async fn fetch(
        &self,
        competitor: &str,
        max_items: usize,
    ) -> Result<Vec<RawNewsItem>, DomainError> {
        let url = format!("{}/rss/search", self.base_url);
        info!(competitor, max_items, "fetching news feed");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", competitor),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .send()
            .await
            .map_err(|e| DomainError::SourceUnavailable(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "news feed returned error");
            return Err(DomainError::SourceUnavailable(format!(
                "feed returned HTTP {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::SourceUnavailable(format!("reading feed body: {}", e)))?;
        debug!(body_len = body.len(), "received news feed");

        let mut items = Self::parse_feed(&body)?;
        items.truncate(max_items);
        info!(competitor, count = items.len(), "news items fetched");
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "google-news"
    }
}
