use crate::verdict::Classification;
use serde::Serialize;

/// Maximum number of characters forwarded to the model per inference call.
pub const MAX_CLASSIFIER_INPUT_CHARS: usize = 512;

/// Labels the adapter maps to a suspicious verdict, compared case-insensitively.
const HARMFUL_LABELS: &[&str] = &["toxic", "spam", "phishing", "malicious", "suspicious"];

/// Raw output of the external probabilistic classifier.
#[derive(Debug, Clone)]
pub struct ModelPrediction {
    pub label: String,
    pub score: f64,
}

/// Externally supplied classification capability. Implementations may block;
/// callers needing cancellation wrap the scan call in their own context.
pub trait ContentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> anyhow::Result<ModelPrediction>;
}

/// Classifier output after label mapping, ready for fusion.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifierVerdict {
    pub label: Classification,
    pub confidence: f64,
    pub explanation: String,
}

impl ClassifierVerdict {
    /// Sentinel returned whenever the model is unconfigured or fails.
    pub fn unavailable() -> Self {
        Self {
            label: Classification::Unknown,
            confidence: 0.5,
            explanation: "classifier unavailable".to_string(),
        }
    }
}

/// Wraps the model capability so that inference failures never reach the
/// caller as errors: the engine degrades to rules-only weighting instead.
pub struct ClassifierAdapter {
    model: Option<Box<dyn ContentClassifier>>,
}

impl ClassifierAdapter {
    pub fn with_model(model: Box<dyn ContentClassifier>) -> Self {
        Self { model: Some(model) }
    }

    /// Always-unknown variant for deployments without a model.
    pub fn disabled() -> Self {
        Self { model: None }
    }

    pub fn assess(&self, text: &str) -> ClassifierVerdict {
        let Some(model) = &self.model else {
            return ClassifierVerdict::unavailable();
        };

        let snippet: String = text.chars().take(MAX_CLASSIFIER_INPUT_CHARS).collect();
        match model.classify(&snippet) {
            Ok(prediction) => Self::map_prediction(prediction),
            Err(e) => {
                log::warn!("classifier inference failed, degrading to rules-only: {e:#}");
                ClassifierVerdict::unavailable()
            }
        }
    }

    fn map_prediction(prediction: ModelPrediction) -> ClassifierVerdict {
        let confidence = prediction.score.clamp(0.0, 1.0);
        let harmful = HARMFUL_LABELS
            .iter()
            .any(|l| prediction.label.eq_ignore_ascii_case(l));
        if harmful {
            ClassifierVerdict {
                label: Classification::Suspicious,
                confidence,
                explanation: "Classifier detected potentially harmful content".to_string(),
            }
        } else {
            ClassifierVerdict {
                label: Classification::Safe,
                confidence,
                explanation: "Classifier scored content as safe".to_string(),
            }
        }
    }
}
