//! Weighted risk-term scanning

use regex::Regex;
use tracing::debug;
use uuid::Uuid;

use crate::core::models::{AnalysisDetails, AnalysisResult};
use crate::Result;

/// Risk terms and their weights. A term present anywhere in the document
/// contributes its weight once; 100 points maps to a score of 1.0.
const RISK_WEIGHTS: &[(&str, u32)] = &[
    ("fraud", 20),
    ("bribery", 15),
    ("sanctions", 25),
    ("bankruptcy", 10),
    ("money laundering", 30),
    ("litigation", 10),
    ("regulatory fines", 20),
    ("tax evasion", 15),
    ("data breach", 20),
    ("antitrust", 15),
];

const FLAGGED_RECOMMENDATION: &str =
    "Review the highlighted sentences for potential compliance issues.";
const CLEAN_RECOMMENDATION: &str =
    "No high-severity risk terms detected; continue standard due diligence.";

/// Scans extracted text against the risk-term table
pub struct RiskAnalyzer {
    sentence_pattern: Regex,
}

impl RiskAnalyzer {
    pub fn new() -> Self {
        // A sentence is a run of text up to (and including) terminal punctuation
        let sentence_pattern =
            Regex::new(r"[^.!?]+[.!?]*").expect("sentence pattern must compile");

        Self { sentence_pattern }
    }

    /// Scan the text and produce a result for the given document
    pub fn analyze(&self, file_id: Uuid, text: &str) -> Result<AnalysisResult> {
        let lower = text.to_lowercase();

        let mut flagged_terms = Vec::new();
        let mut points = 0u32;
        for (term, weight) in RISK_WEIGHTS {
            if lower.contains(term) {
                flagged_terms.push((*term).to_string());
                points += weight;
            }
        }

        let risk_score = (points as f32 / 100.0).min(1.0);
        let summary = self.summarize(text, &flagged_terms);
        let recommendations = if flagged_terms.is_empty() {
            CLEAN_RECOMMENDATION.to_string()
        } else {
            FLAGGED_RECOMMENDATION.to_string()
        };

        debug!(
            "Scanned {} chars: {} flagged terms, score {:.2}",
            text.len(),
            flagged_terms.len(),
            risk_score
        );

        AnalysisResult::new(
            file_id,
            risk_score,
            summary,
            AnalysisDetails {
                flagged_terms,
                recommendations,
            },
        )
    }

    /// Summarize by picking sentences containing flagged terms, falling back
    /// to the first sentence
    fn summarize(&self, text: &str, flagged_terms: &[String]) -> String {
        let sentences = self.split_sentences(text);

        let mut picked: Vec<&str> = sentences
            .iter()
            .copied()
            .filter(|sentence| {
                let lower = sentence.to_lowercase();
                flagged_terms.iter().any(|term| lower.contains(term.as_str()))
            })
            .collect();

        if picked.is_empty() {
            if let Some(first) = sentences.first() {
                picked.push(first);
            }
        }

        picked.join(" ")
    }

    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.sentence_pattern
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_scores_zero() {
        let analyzer = RiskAnalyzer::new();
        let result = analyzer
            .analyze(Uuid::new_v4(), "The quarterly numbers look healthy.")
            .unwrap();

        assert_eq!(result.risk_score, 0.0);
        assert!(result.details.flagged_terms.is_empty());
        assert_eq!(result.details.recommendations, CLEAN_RECOMMENDATION);
        // Falls back to the first sentence
        assert_eq!(result.summary, "The quarterly numbers look healthy.");
    }

    #[test]
    fn test_flagged_terms_add_their_weights() {
        let analyzer = RiskAnalyzer::new();
        let text = "The subsidiary faces litigation. Auditors also suspect fraud in the ledger.";
        let result = analyzer.analyze(Uuid::new_v4(), text).unwrap();

        // litigation (10) + fraud (20)
        assert!((result.risk_score - 0.30).abs() < f32::EPSILON);
        assert_eq!(result.details.flagged_terms, vec!["fraud", "litigation"]);
        assert_eq!(result.details.recommendations, FLAGGED_RECOMMENDATION);
    }

    #[test]
    fn test_score_caps_at_one() {
        let analyzer = RiskAnalyzer::new();
        let text = "fraud bribery sanctions bankruptcy money laundering litigation \
                    regulatory fines tax evasion data breach antitrust";
        let result = analyzer.analyze(Uuid::new_v4(), text).unwrap();

        assert_eq!(result.risk_score, 1.0);
        assert_eq!(result.details.flagged_terms.len(), RISK_WEIGHTS.len());
    }

    #[test]
    fn test_summary_picks_flagged_sentences() {
        let analyzer = RiskAnalyzer::new();
        let text = "Revenue grew last year. Regulators opened a fraud case. Offices moved.";
        let result = analyzer.analyze(Uuid::new_v4(), text).unwrap();

        assert_eq!(result.summary, "Regulators opened a fraud case.");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let analyzer = RiskAnalyzer::new();
        let result = analyzer
            .analyze(Uuid::new_v4(), "OFAC SANCTIONS apply to this entity.")
            .unwrap();

        assert_eq!(result.details.flagged_terms, vec!["sanctions"]);
        assert!((result.risk_score - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_text_yields_empty_summary() {
        let analyzer = RiskAnalyzer::new();
        let result = analyzer.analyze(Uuid::new_v4(), "").unwrap();

        assert_eq!(result.risk_score, 0.0);
        assert!(result.summary.is_empty());
    }
}
