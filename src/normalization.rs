use regex::Regex;

/// Prepares raw email text for rule scanning and classification.
///
/// Markup tags are removed, whitespace runs collapse to a single space, and
/// the result is case-folded and trimmed. Unmatched angle brackets are not
/// markup and pass through literally.
pub struct TextNormalizer {
    markup_regex: Regex,
    whitespace_regex: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            markup_regex: Regex::new(r"<[^>]+>").unwrap(),
            whitespace_regex: Regex::new(r"\s+").unwrap(),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let stripped = self.markup_regex.replace_all(text, "");
        let collapsed = self.whitespace_regex.replace_all(&stripped, " ");
        collapsed.to_lowercase().trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
