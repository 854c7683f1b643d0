//! Output formatting utilities for the CLI

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::time::Duration;

use docrisk_core::{AnalysisResult, FileType};

/// Text formatter for terminal reports
pub struct OutputFormatter {
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new() -> Self {
        let use_colors = atty::is(atty::Stream::Stdout);
        Self { use_colors }
    }

    /// Create a spinner for long operations
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Format a risk report for one document
    pub fn format_report(
        &self,
        name: &str,
        file_type: &FileType,
        size: u64,
        result: &AnalysisResult,
    ) -> String {
        let mut output = String::new();

        if self.use_colors {
            output.push_str(&format!("\n{}\n", "🔍 DocRisk Report".bright_cyan().bold()));
            output.push_str(&format!("{}\n", "═".repeat(40).bright_blue()));
            output.push_str(&format!(
                "{} {} ({}, {} bytes)\n",
                "📁 File:".bright_yellow(),
                name.white().bold(),
                file_type,
                size
            ));

            let score = format!("{:.2}", result.risk_score);
            let score = if result.is_high_risk() {
                score.bright_red().bold()
            } else {
                score.bright_green()
            };
            output.push_str(&format!("{} {}\n", "⚠️  Risk score:".bright_yellow(), score));
        } else {
            output.push_str("\n🔍 DocRisk Report\n");
            output.push_str(&format!("{}\n", "═".repeat(40)));
            output.push_str(&format!("📁 File: {} ({}, {} bytes)\n", name, file_type, size));
            output.push_str(&format!("⚠️  Risk score: {:.2}\n", result.risk_score));
        }

        output.push_str(&self.format_flagged_terms(&result.details.flagged_terms));
        output.push_str(&format!("\n📝 Summary: {}\n", result.summary));
        output.push_str(&format!("💡 {}\n", result.details.recommendations));

        output
    }

    fn format_flagged_terms(&self, terms: &[String]) -> String {
        if terms.is_empty() {
            return "\n🚩 No risk terms flagged\n".to_string();
        }

        let mut output = String::new();
        if self.use_colors {
            output.push_str(&format!("\n{}\n", "🚩 Flagged terms".bright_cyan().bold()));
        } else {
            output.push_str("\n🚩 Flagged terms\n");
        }

        for (i, term) in terms.iter().enumerate() {
            if self.use_colors {
                output.push_str(&format!(
                    "  {} {}\n",
                    format!("{}.", i + 1).bright_blue(),
                    term.white()
                ));
            } else {
                output.push_str(&format!("  {}. {}\n", i + 1, term));
            }
        }

        output
    }

    /// Format one line of scraper output
    pub fn format_scrape_line(&self, url: &str, emails: &BTreeSet<String>) -> String {
        if emails.is_empty() {
            return format!("{} -> no emails found", url);
        }

        let joined = emails.iter().cloned().collect::<Vec<_>>().join(", ");
        if self.use_colors {
            format!("{} -> {}", url, joined.bright_green())
        } else {
            format!("{} -> {}", url, joined)
        }
    }

    pub fn format_scrape_failure(&self, url: &str) -> String {
        if self.use_colors {
            format!("{} -> {}", url, "fetch failed".bright_red())
        } else {
            format!("{} -> fetch failed", url)
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}
