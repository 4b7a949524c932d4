use crate::classifier::ClassifierVerdict;
use crate::config::FusionWeights;
use crate::scanner::{HeuristicReport, MatchRecord};
use crate::verdict::{Classification, RiskLevel};
use serde::Serialize;

/// Final fused verdict for one message.
#[derive(Debug, Clone, Serialize)]
pub struct FusionResult {
    pub classification: Classification,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    pub explanation: String,
    pub matches: Vec<MatchRecord>,
}

impl FusionResult {
    /// Fixed verdict for empty or whitespace-only input; neither signal
    /// source is consulted.
    pub fn empty_input() -> Self {
        Self {
            classification: Classification::Unknown,
            confidence: 0.0,
            risk_level: None,
            explanation: "No content to analyze".to_string(),
            matches: Vec::new(),
        }
    }
}

/// Combines the classifier verdict and the heuristic report into one result.
/// A pure function of its two inputs: same inputs, same output.
pub struct FusionEngine {
    weights: FusionWeights,
}

impl FusionEngine {
    pub fn new(weights: FusionWeights) -> Self {
        Self { weights }
    }

    pub fn fuse(&self, verdict: ClassifierVerdict, report: HeuristicReport) -> FusionResult {
        // Full heuristic fallback when the classifier produced no usable label.
        let (classifier_weight, scanner_weight) = if verdict.label == Classification::Unknown {
            (0.0, 1.0)
        } else {
            (
                self.weights.classifier_weight,
                self.weights.scanner_weight(),
            )
        };

        let confidence =
            verdict.confidence * classifier_weight + report.confidence * scanner_weight;

        let (classification, risk_level) = if confidence >= self.weights.high_risk_threshold {
            (Classification::Suspicious, RiskLevel::High)
        } else if confidence >= self.weights.medium_risk_threshold {
            (Classification::Suspicious, RiskLevel::Medium)
        } else {
            (Classification::Safe, RiskLevel::Low)
        };

        let explanation = [verdict.explanation.as_str(), report.explanation.as_str()]
            .iter()
            .filter(|e| !e.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");

        log::debug!(
            "fused confidence {confidence:.3} ({} x {classifier_weight} + {} x {scanner_weight}) -> {} / {}",
            verdict.confidence,
            report.confidence,
            classification.as_str(),
            risk_level.as_str()
        );

        FusionResult {
            classification,
            confidence,
            risk_level: Some(risk_level),
            explanation,
            matches: report.matches,
        }
    }
}
