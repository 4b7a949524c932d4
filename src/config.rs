use serde::{Deserialize, Serialize};

/// Confidence buckets the scanner assigns from the raw match count. The
/// fusion stage depends on these exact figures, so they live in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerScoring {
    /// Match count at which the heuristic signal is considered strong.
    pub strong_match_count: usize,
    /// Confidence reported when no rule fires (leaning safe).
    pub clean_confidence: f64,
    /// Confidence for one or two matches (leaning suspicious).
    pub weak_confidence: f64,
    /// Confidence at or above the strong match count.
    pub strong_confidence: f64,
}

impl Default for ScannerScoring {
    fn default() -> Self {
        Self {
            strong_match_count: 3,
            clean_confidence: 0.7,
            weak_confidence: 0.6,
            strong_confidence: 0.8,
        }
    }
}

/// Weighting and bucketing policy for the fusion stage.
///
/// The classifier weight applies only when it produced a usable verdict;
/// otherwise the scanner carries full weight. The scanner weight is always
/// the complement, so the combined confidence stays in [0,1].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub classifier_weight: f64,
    /// Combined confidence at or above this is classified suspicious / high risk.
    pub high_risk_threshold: f64,
    /// Combined confidence at or above this (but below high) is suspicious / medium.
    pub medium_risk_threshold: f64,
}

impl FusionWeights {
    pub fn scanner_weight(&self) -> f64 {
        1.0 - self.classifier_weight
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            classifier_weight: 0.7,
            high_risk_threshold: 0.7,
            medium_risk_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScannerScoring,
    pub fusion: FusionWeights,
}
