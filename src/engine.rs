use crate::classifier::{ClassifierAdapter, ContentClassifier};
use crate::config::EngineConfig;
use crate::fusion::{FusionEngine, FusionResult};
use crate::normalization::TextNormalizer;
use crate::rules::RuleCatalog;
use crate::scanner::RuleScanner;
use anyhow::Context;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fused verdict plus the wall-clock time the scan took.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    #[serde(flatten)]
    pub result: FusionResult,
    #[serde(rename = "processing_time", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Single entry point for scanning one email body.
///
/// Stateless after construction: the rule catalog and classifier handle are
/// immutable, so one instance serves concurrent scan calls without locking.
pub struct EmailGuard {
    normalizer: TextNormalizer,
    scanner: RuleScanner,
    adapter: ClassifierAdapter,
    fusion: FusionEngine,
}

impl EmailGuard {
    /// Builds an engine with the default scoring policy. Pass `None` to run
    /// rules-only; the classifier slot then always reports unknown.
    pub fn new(classifier: Option<Box<dyn ContentClassifier>>) -> anyhow::Result<Self> {
        Self::with_config(EngineConfig::default(), classifier)
    }

    pub fn with_config(
        config: EngineConfig,
        classifier: Option<Box<dyn ContentClassifier>>,
    ) -> anyhow::Result<Self> {
        let catalog =
            Arc::new(RuleCatalog::compile().context("failed to build rule catalog")?);
        log::info!(
            "email guard ready: {} rules, classifier {}",
            catalog.len(),
            if classifier.is_some() {
                "configured"
            } else {
                "disabled"
            }
        );
        let adapter = match classifier {
            Some(model) => ClassifierAdapter::with_model(model),
            None => ClassifierAdapter::disabled(),
        };
        Ok(Self {
            normalizer: TextNormalizer::new(),
            scanner: RuleScanner::new(catalog, config.scoring),
            adapter,
            fusion: FusionEngine::new(config.fusion),
        })
    }

    /// Scans one email body. Never fails: empty input short-circuits, and a
    /// broken classifier degrades to rules-only weighting.
    pub fn scan(&self, text: &str) -> ScanOutcome {
        let started = Instant::now();

        if text.trim().is_empty() {
            return ScanOutcome {
                result: FusionResult::empty_input(),
                elapsed: started.elapsed(),
            };
        }

        let normalized = self.normalizer.normalize(text);
        // No ordering dependency between the two signal sources.
        let report = self.scanner.scan(&normalized);
        let verdict = self.adapter.assess(&normalized);
        let result = self.fusion.fuse(verdict, report);

        ScanOutcome {
            result,
            elapsed: started.elapsed(),
        }
    }
}
