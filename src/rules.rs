use anyhow::Context;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Signal family a rule belongs to. Category is reported with each match but
/// does not change scoring; both families feed one undifferentiated count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Phishing,
    Spam,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Phishing => "phishing",
            RuleCategory::Spam => "spam",
        }
    }
}

/// One pattern-based detector, compiled at catalog construction and immutable
/// thereafter.
pub struct RuleDefinition {
    category: RuleCategory,
    description: &'static str,
    pattern: Regex,
}

impl RuleDefinition {
    fn compile(
        category: RuleCategory,
        description: &'static str,
        pattern: &str,
    ) -> anyhow::Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("invalid rule pattern for '{description}'"))?;
        Ok(Self {
            category,
            description,
            pattern,
        })
    }

    pub fn category(&self) -> RuleCategory {
        self.category
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

const PHISHING_RULES: &[(&str, &str)] = &[
    (
        "Urgency phrasing",
        r"\b(urgent|immediate|action required|account suspended|verify now)\b",
    ),
    (
        "Deadline pressure",
        r"\b(limited time|expires soon|last chance|final notice)\b",
    ),
    (
        "Financial threat phrasing",
        r"\b(account locked|payment overdue|billing issue|refund pending)\b",
    ),
    (
        "Financial or credential terms",
        r"\b(credit card|bank account|social security|password expired)\b",
    ),
    (
        "Suspicious top-level domain in URL",
        r"https?://[^\s]*\.(tk|ml|ga|cf|gq|xyz|top|club|online|site)\b",
    ),
    (
        "Raw IP address in URL",
        r"https?://[^\s]*\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b",
    ),
    (
        "Look-alike brand spelling",
        r"\b(amaz0n|paypa1|goog1e|faceb00k|app1e|micr0soft)\b",
    ),
    (
        "Credential harvesting phrasing",
        r"\b(password|username|ssn|credit card|bank account|mother maiden)\b",
    ),
    (
        "Executable attachment extension",
        r"\b\.(exe|bat|scr|pif|com|vbs|js|jar)\b",
    ),
    (
        "Generic salutation",
        r"\b(dear user|dear customer|dear sir|dear madam)\b",
    ),
    (
        "Suspicious sender domain",
        r"from:\s*[^\s]*@[^\s]*\.(tk|ml|ga|cf|gq|xyz|top|club|online|site)",
    ),
];

const SPAM_RULES: &[(&str, &str)] = &[
    (
        "Marketing phrasing",
        r"\b(free|discount|offer|limited|sale|deal|save money)\b",
    ),
    (
        "Call-to-action phrasing",
        r"\b(click here|buy now|order now|subscribe|unsubscribe)\b",
    ),
    (
        "Restricted goods keywords",
        r"\b(viagra|cialis|weight loss|diet pills|make money fast)\b",
    ),
    (
        "Prize or lottery phrasing",
        r"\b(winner|prize|lottery|inheritance|million dollars)\b",
    ),
    ("Repeated exclamation marks", r"!{2,}"),
    // Matched case-insensitively like every other rule, so this fires on any
    // run of four or more letters, not only upper-case ones.
    ("Long all-caps token", r"\b[A-Z]{4,}\b"),
    (
        "Bracketed link placeholder",
        r"\[click here\]|\[here\]|\[link\]",
    ),
];

/// Fixed, ordered catalog of heuristic detectors: phishing-signal rules
/// first, then spam-signal rules. Extending it is a code change.
pub struct RuleCatalog {
    rules: Vec<RuleDefinition>,
}

impl RuleCatalog {
    /// Compiles the built-in catalog. A malformed pattern fails here, before
    /// any traffic is served; scanning itself cannot fail.
    pub fn compile() -> anyhow::Result<Self> {
        let mut rules = Vec::with_capacity(PHISHING_RULES.len() + SPAM_RULES.len());
        for (description, pattern) in PHISHING_RULES {
            rules.push(RuleDefinition::compile(
                RuleCategory::Phishing,
                description,
                pattern,
            )?);
        }
        for (description, pattern) in SPAM_RULES {
            rules.push(RuleDefinition::compile(
                RuleCategory::Spam,
                description,
                pattern,
            )?);
        }
        log::debug!("compiled rule catalog with {} rules", rules.len());
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
