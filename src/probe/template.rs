//! Timestamp substitution into a URL pattern.

/// Token replaced by the candidate timestamp.
pub const PLACEHOLDER: &str = "{ts}";

/// A URL pattern containing the [`PLACEHOLDER`] token.
///
/// Substitution is literal text replacement, not a format string: braces other
/// than the exact token are left alone, and a pattern without the token renders
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    pattern: String,
}

impl UrlTemplate {
    /// Wraps a pattern string.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The raw pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern contains the placeholder at all.
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.pattern.contains(PLACEHOLDER)
    }

    /// Replaces every occurrence of the placeholder with `timestamp` in decimal.
    #[must_use]
    pub fn render(&self, timestamp: i64) -> String {
        self.pattern.replace(PLACEHOLDER, &timestamp.to_string())
    }
}
