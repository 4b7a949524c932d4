use crate::config::ScannerScoring;
use crate::rules::{RuleCatalog, RuleCategory};
use crate::verdict::Classification;
use serde::Serialize;
use std::sync::Arc;

/// Evidence that one rule fired against the normalized text.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub category: RuleCategory,
    pub rule_description: String,
}

/// Outcome of one pass over the rule catalog.
#[derive(Debug, Clone)]
pub struct HeuristicReport {
    /// Matches in catalog order.
    pub matches: Vec<MatchRecord>,
    pub confidence: f64,
    pub leaning: Classification,
    pub explanation: String,
}

/// Applies the whole catalog to normalized text. Every rule is evaluated on
/// every call so match counts stay comparable across messages; the catalog is
/// shared read-only, so one scanner serves concurrent callers.
pub struct RuleScanner {
    catalog: Arc<RuleCatalog>,
    scoring: ScannerScoring,
}

impl RuleScanner {
    pub fn new(catalog: Arc<RuleCatalog>, scoring: ScannerScoring) -> Self {
        Self { catalog, scoring }
    }

    pub fn scan(&self, normalized: &str) -> HeuristicReport {
        let mut matches = Vec::new();
        for rule in self.catalog.rules() {
            if rule.matches(normalized) {
                matches.push(MatchRecord {
                    category: rule.category(),
                    rule_description: rule.description().to_string(),
                });
            }
        }

        let count = matches.len();
        let (confidence, leaning) = if count >= self.scoring.strong_match_count {
            (self.scoring.strong_confidence, Classification::Suspicious)
        } else if count >= 1 {
            (self.scoring.weak_confidence, Classification::Suspicious)
        } else {
            (self.scoring.clean_confidence, Classification::Safe)
        };

        let explanation = if count == 0 {
            "No suspicious patterns detected".to_string()
        } else {
            format!("Detected {count} suspicious patterns")
        };

        log::debug!("rule scan: {count} matches, heuristic confidence {confidence}");

        HeuristicReport {
            matches,
            confidence,
            leaning,
            explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> RuleScanner {
        let catalog = Arc::new(RuleCatalog::compile().unwrap());
        RuleScanner::new(catalog, ScannerScoring::default())
    }

    // All words three letters or shorter, so even the degenerate long-token
    // rule stays quiet.
    const CLEAN_TEXT: &str = "hi bob, see you at two";

    #[test]
    fn test_zero_matches_leans_safe() {
        let report = scanner().scan(CLEAN_TEXT);
        assert!(report.matches.is_empty());
        assert_eq!(report.confidence, 0.7);
        assert_eq!(report.leaning, Classification::Safe);
        assert_eq!(report.explanation, "No suspicious patterns detected");
    }

    #[test]
    fn test_few_matches_lean_suspicious() {
        // "urgent" (urgency phrasing) plus the long-token rule: two matches.
        let report = scanner().scan("urgent: call me");
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.confidence, 0.6);
        assert_eq!(report.leaning, Classification::Suspicious);
        assert_eq!(report.explanation, "Detected 2 suspicious patterns");
    }

    #[test]
    fn test_single_match_leans_suspicious() {
        // "!!" trips only the repeated-exclamation rule.
        let report = scanner().scan("!!");
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.confidence, 0.6);
        assert_eq!(report.leaning, Classification::Suspicious);
    }

    #[test]
    fn test_many_matches_raise_confidence() {
        let report =
            scanner().scan("urgent: your bank account is suspended, click here to verify now!!");
        assert!(report.matches.len() >= 3);
        assert_eq!(report.confidence, 0.8);
        assert_eq!(report.leaning, Classification::Suspicious);
    }

    #[test]
    fn test_matches_follow_catalog_order() {
        let catalog = Arc::new(RuleCatalog::compile().unwrap());
        let scanner = RuleScanner::new(Arc::clone(&catalog), ScannerScoring::default());
        let report =
            scanner.scan("urgent: your bank account is suspended, click here to verify now!!");

        let descriptions: Vec<&str> = report
            .matches
            .iter()
            .map(|m| m.rule_description.as_str())
            .collect();
        let catalog_order: Vec<&str> = catalog
            .rules()
            .iter()
            .map(|r| r.description())
            .filter(|d| descriptions.contains(d))
            .collect();
        assert_eq!(descriptions, catalog_order);
        // Phishing-signal matches come before spam-signal ones.
        let first_spam = report
            .matches
            .iter()
            .position(|m| m.category == RuleCategory::Spam);
        if let Some(pos) = first_spam {
            assert!(report.matches[pos..]
                .iter()
                .all(|m| m.category == RuleCategory::Spam));
        }
    }

    #[test]
    fn test_every_rule_is_evaluated() {
        // Repeated scans of the same text always report the same count; a
        // short-circuiting scanner could not guarantee that.
        let scanner = scanner();
        let text = "free prize winner!! click here";
        let first = scanner.scan(text).matches.len();
        for _ in 0..5 {
            assert_eq!(scanner.scan(text).matches.len(), first);
        }
        assert!(first >= 3);
    }

    #[test]
    fn test_scan_of_empty_string() {
        let report = scanner().scan("");
        assert!(report.matches.is_empty());
        assert_eq!(report.confidence, 0.7);
    }
}
