//! Lead scraping: fetch pages and extract contact emails

use regex::Regex;
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

use crate::core::errors::DocRiskError;
use crate::Result;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches pages over HTTP and extracts email-like substrings
pub struct LeadScraper {
    client: Client,
    email_pattern: Regex,
    block_pattern: Regex,
    tag_pattern: Regex,
}

impl LeadScraper {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("docrisk/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        let email_pattern = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("email pattern must compile");
        let block_pattern = Regex::new(r"(?is)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>")
            .expect("block pattern must compile");
        let tag_pattern = Regex::new(r"<[^>]+>").expect("tag pattern must compile");

        Self {
            client,
            email_pattern,
            block_pattern,
            tag_pattern,
        }
    }

    /// Fetch a page and extract email addresses from its text
    pub async fn scrape_url(&self, url: &str) -> Result<BTreeSet<String>> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| DocRiskError::FetchError {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let body = response.text().await.map_err(|e| DocRiskError::FetchError {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let emails = self.extract_emails(&body);
        debug!("Found {} emails at {}", emails.len(), url);
        Ok(emails)
    }

    /// Extract deduplicated email addresses from a block of HTML
    pub fn extract_emails(&self, html: &str) -> BTreeSet<String> {
        let text = self.strip_markup(html);
        self.email_pattern
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Drop script/style blocks and tags, keeping the page text
    fn strip_markup(&self, html: &str) -> String {
        let without_blocks = self.block_pattern.replace_all(html, " ");
        self.tag_pattern.replace_all(&without_blocks, " ").into_owned()
    }
}

impl Default for LeadScraper {
    fn default() -> Self {
        Self::new()
    }
}
