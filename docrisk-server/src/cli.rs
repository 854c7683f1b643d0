//! CLI commands that run without the HTTP layer

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use docrisk_core::{FileType, LeadScraper, RiskAnalyzer, TextExtractor};

use crate::output::OutputFormatter;

/// Analyze a local file and print the risk report
pub async fn analyze_command(file: PathBuf, json: bool) -> Result<()> {
    let data = tokio::fs::read(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.bin");
    let file_type = FileType::sniff(&data, name);
    debug!("Detected {} as {}", name, file_type);

    let extractor = TextExtractor::new();
    let analyzer = RiskAnalyzer::new();

    let text = extractor.extract(&data, &file_type);
    let result = analyzer.analyze(Uuid::new_v4(), &text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let formatter = OutputFormatter::new();
        print!(
            "{}",
            formatter.format_report(name, &file_type, data.len() as u64, &result)
        );
    }

    Ok(())
}

/// Fetch pages and print the extracted contact emails
pub async fn scrape_command(
    mut urls: Vec<String>,
    list: Option<PathBuf>,
    timeout: u64,
) -> Result<()> {
    if let Some(path) = list {
        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read URL list {}", path.display()))?;
        urls.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    if urls.is_empty() {
        bail!("no URLs to scrape; pass them as arguments or via --list");
    }

    let scraper = LeadScraper::with_timeout(Duration::from_secs(timeout));
    let formatter = OutputFormatter::new();

    for url in &urls {
        let spinner = formatter.create_spinner(&format!("Fetching {}", url));
        match scraper.scrape_url(url).await {
            Ok(emails) => {
                spinner.finish_and_clear();
                println!("{}", formatter.format_scrape_line(url, &emails));
            }
            Err(e) => {
                spinner.finish_and_clear();
                warn!("{}", e);
                println!("{}", formatter.format_scrape_failure(url));
            }
        }
    }

    Ok(())
}
